pub use self::{
    core_client::CoreClient,
    model::{BlockVerbose, ScriptPubKey, TxVerbose, VinVerbose, VoutVerbose},
};

mod core_client;
mod model;

use {bitcoin::BlockHash, std::sync::Mutex, thiserror::Error};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("node unavailable: {0}")]
    Unavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad hash `{0}`")]
    BadHash(String),
    #[error("rpc client lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, RpcError>;

/// The node calls the watcher issues. Implemented by [`CoreClient`] for a
/// real Bitcoin Core node and by a mock in tests.
pub trait NodeClient: Send {
    fn block_count(&self) -> Result<i64>;
    fn block_verbose(&self, hash: &BlockHash) -> Result<BlockVerbose>;
    fn block_txids(&self, hash: &BlockHash) -> Result<Vec<String>>;
    fn tx_verbose(&self, txid: &str) -> Result<TxVerbose>;
}

/// Serialized access to the node.
///
/// Every call acquires the mutex for exactly one round-trip and releases it
/// before returning; callers must assume each call may block behind another
/// worker's request.
pub struct RpcGateway {
    client: Mutex<Box<dyn NodeClient>>,
}

impl RpcGateway {
    pub fn new(client: Box<dyn NodeClient>) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }

    pub fn tip_height(&self) -> Result<i64> {
        self.lock()?.block_count()
    }

    pub fn block_verbose(&self, hash: &BlockHash) -> Result<BlockVerbose> {
        self.lock()?.block_verbose(hash)
    }

    /// Txids of a block, in block order, from the raw block.
    pub fn block_txids(&self, hash: &BlockHash) -> Result<Vec<String>> {
        self.lock()?.block_txids(hash)
    }

    pub fn tx_verbose(&self, txid: &str) -> Result<TxVerbose> {
        self.lock()?.tx_verbose(txid)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Box<dyn NodeClient>>> {
        self.client.lock().map_err(|_| RpcError::LockPoisoned)
    }
}
