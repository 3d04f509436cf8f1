use {super::TxStatus, serde::Serialize};

/// A newly created spendable output on a tracked address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendableOutput {
    pub tx_id: String,
    pub tx_out_id: i32,
    pub tx_out_amount: i64,
    pub tx_out_script: String,
    pub address: String,
    pub user_id: String,
    pub tx_status: TxStatus,
    pub wallet_index: i32,
    pub address_index: i32,
}

/// Removal of a spendable output that a new transaction consumed.
///
/// `tx_id` names the previous transaction whose output was spent, not the
/// spending transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSpendable {
    pub user_id: String,
    pub tx_id: String,
    pub address: String,
}

/// Tells downstream consumers to purge a confirmed tx from their mempool
/// mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteMempool {
    pub hash: String,
}

/// Fee-rate record for a mempool transaction, in satoshis per byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MempoolRecord {
    pub fee_rate: i64,
    pub hash: String,
}
