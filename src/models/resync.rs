use {
    super::{DeleteSpendable, SpendableOutput, UserTx},
    serde::{Deserialize, Serialize},
};

/// One transaction to replay during an address resync.
#[derive(Debug, Clone, Deserialize)]
pub struct ResyncTx {
    pub hash: String,
    pub block_height: i64,
}

/// The address whose history is being resynced.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressToResync {
    pub address: String,
    pub user_id: String,
}

/// Everything a resync produced, collected instead of streamed so the caller
/// can ship it as one payload.
#[derive(Debug, Default, Serialize)]
pub struct ResyncBatch {
    pub txs: Vec<UserTx>,
    pub created: Vec<SpendableOutput>,
    pub deleted: Vec<DeleteSpendable>,
}
