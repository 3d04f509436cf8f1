use {
    bitcoincore_rpc::Auth, clap::Parser, std::path::PathBuf, tracing::warn,
};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "satwatch",
    about = "Streams user-scoped Bitcoin transaction events for tracked wallet addresses",
    version
)]
pub struct Options {
    #[arg(
        long,
        help = "Connect to Bitcoin Core RPC at <BITCOIN_RPC_URL>.",
        default_value = "http://localhost:8332"
    )]
    pub bitcoin_rpc_url: String,

    #[arg(
        long,
        help = "Authenticate to Bitcoin Core RPC as <BITCOIN_RPC_USERNAME>."
    )]
    pub bitcoin_rpc_username: Option<String>,

    #[arg(
        long,
        help = "Authenticate to Bitcoin Core RPC with <BITCOIN_RPC_PASSWORD>."
    )]
    pub bitcoin_rpc_password: Option<String>,

    #[arg(long, help = "Load Bitcoin Core RPC cookie file from <COOKIE_FILE>.")]
    pub cookie_file: Option<PathBuf>,

    /// ZeroMQ endpoint for raw blocks and transactions from bitcoind
    #[arg(long, default_value = "tcp://127.0.0.1:28332")]
    pub zmq_endpoint: String,

    /// Load tracked addresses from <TRACKED_ADDRESSES> (JSON map of
    /// address to ownership record) at startup
    #[arg(long)]
    pub tracked_addresses: Option<PathBuf>,

    /// Capacity of each outbound event stream. [default: 64]
    #[arg(long, default_value = "64")]
    pub stream_capacity: usize,

    /// Recompute outgoing view amounts from the first touched address,
    /// as the legacy streamer did
    #[arg(long, default_value = "false")]
    pub legacy_view_amount: bool,
}

impl Options {
    pub fn bitcoin_rpc_auth(&self) -> Auth {
        if let Some(cookie_file) = self.cookie_file.as_ref() {
            Auth::CookieFile(cookie_file.clone())
        } else if let Some(username) = self.bitcoin_rpc_username.as_ref() {
            Auth::UserPass(
                username.clone(),
                self.bitcoin_rpc_password.clone().unwrap_or_default(),
            )
        } else {
            warn!("No authentication provided for Bitcoin Core RPC");
            Auth::None
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bitcoin_rpc_url: String,
    pub bitcoin_rpc_auth: Auth,
    pub zmq_endpoint: String,
    pub tracked_addresses: Option<PathBuf>,
    pub stream_capacity: usize,
    pub legacy_view_amount: bool,
}

impl From<Options> for Settings {
    fn from(options: Options) -> Self {
        let bitcoin_rpc_auth = options.bitcoin_rpc_auth();

        Self {
            bitcoin_rpc_url: options.bitcoin_rpc_url,
            bitcoin_rpc_auth,
            zmq_endpoint: options.zmq_endpoint,
            tracked_addresses: options.tracked_addresses,
            stream_capacity: options.stream_capacity,
            legacy_view_amount: options.legacy_view_amount,
        }
    }
}
