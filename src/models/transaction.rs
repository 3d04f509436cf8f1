use serde::{Deserialize, Serialize};

/// Block height used for transactions that are not in a block yet.
pub const MEMPOOL_HEIGHT: i64 = -1;

/// Satoshis in one bitcoin, as the conversion factor for node amounts.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Convert a decimal-BTC amount from the node into satoshis.
///
/// Node amounts are exact multiples of one satoshi, but their `f64`
/// representation can sit one ulp below the true value (0.29 * 1e8 is
/// 28_999_999.999...), so the product is rounded to recover the exact
/// satoshi count instead of truncating the float artifact away.
pub fn sats(btc: f64) -> i64 {
    (btc * SATS_PER_BTC).round() as i64
}

/// Stable wire codes for the lifecycle of a user-scoped transaction view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TxStatus {
    MempoolIncoming = 1,
    BlockIncoming = 2,
    MempoolOutgoing = 3,
    BlockOutgoing = 4,
    ConfirmedIncoming = 5,
    ConfirmedOutgoing = 6,
}

impl TxStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_outgoing(self) -> bool {
        matches!(
            self,
            TxStatus::MempoolOutgoing | TxStatus::BlockOutgoing | TxStatus::ConfirmedOutgoing
        )
    }

    pub fn is_incoming(self) -> bool {
        !self.is_outgoing()
    }
}

impl From<TxStatus> for i32 {
    fn from(status: TxStatus) -> i32 {
        status as i32
    }
}

impl TryFrom<i32> for TxStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TxStatus::MempoolIncoming),
            2 => Ok(TxStatus::BlockIncoming),
            3 => Ok(TxStatus::MempoolOutgoing),
            4 => Ok(TxStatus::BlockOutgoing),
            5 => Ok(TxStatus::ConfirmedIncoming),
            6 => Ok(TxStatus::ConfirmedOutgoing),
            other => Err(format!("unknown tx status code {other}")),
        }
    }
}

/// Who owns a tracked address. Maintained by an external subsystem; the
/// watcher only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub user_id: String,
    pub wallet_index: i32,
    pub address_index: i32,
}

/// One address with the satoshi amount it carries on its side of a tx.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressAmount {
    pub address: String,
    pub amount: i64,
}

impl AddressAmount {
    pub fn new(address: impl Into<String>, amount: i64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// A tracked wallet implicated on one side of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletTouch {
    pub user_id: String,
    pub wallet_index: i32,
    pub address_index: i32,
    pub address: String,
    pub amount: i64,
    #[serde(rename = "tx_out_index")]
    pub out_index: i32,
}

impl WalletTouch {
    pub fn new(record: OwnershipRecord, address: impl Into<String>, amount: i64, out_index: i32) -> Self {
        Self {
            user_id: record.user_id,
            wallet_index: record.wallet_index,
            address_index: record.address_index,
            address: address.into(),
            amount,
            out_index,
        }
    }

    /// Two touches belong to the same wallet of the same user.
    pub fn same_wallet(&self, other: &WalletTouch) -> bool {
        self.user_id == other.user_id && self.wallet_index == other.wallet_index
    }
}

/// The working record of one transaction as it moves through the pipeline.
///
/// The parser builds the skeleton, the enrich pass fills fee and the flat
/// input/output echoes, the splitter clones it once per user-scoped view,
/// and the finalizer shapes the per-view amount and address list. The same
/// type is the outbound transaction event.
#[derive(Debug, Clone, Serialize)]
pub struct UserTx {
    pub user_id: String,
    pub tx_id: String,
    pub tx_hash: String,
    pub tx_out_script: String,
    pub tx_address: Vec<String>,
    pub tx_status: TxStatus,
    pub tx_out_amount: i64,
    pub block_time: i64,
    pub block_height: i64,
    pub confirmations: i32,
    pub tx_fee: i64,
    pub mempool_time: i64,
    pub tx_inputs: Vec<AddressAmount>,
    pub tx_outputs: Vec<AddressAmount>,
    pub wallets_input: Vec<WalletTouch>,
    pub wallets_output: Vec<WalletTouch>,
    pub resync: bool,
}

impl Default for UserTx {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            tx_id: String::new(),
            tx_hash: String::new(),
            tx_out_script: String::new(),
            tx_address: Vec::new(),
            tx_status: TxStatus::MempoolIncoming,
            tx_out_amount: 0,
            block_time: -1,
            block_height: MEMPOOL_HEIGHT,
            confirmations: 0,
            tx_fee: 0,
            mempool_time: 0,
            tx_inputs: Vec::new(),
            tx_outputs: Vec::new(),
            wallets_input: Vec::new(),
            wallets_output: Vec::new(),
            resync: false,
        }
    }
}

impl UserTx {
    /// A transaction is related when the parser recorded at least one touch
    /// of a tracked wallet; unrelated transactions never leave the parser.
    pub fn is_related(&self) -> bool {
        !self.tx_id.is_empty()
    }
}
