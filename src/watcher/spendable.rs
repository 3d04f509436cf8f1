use {
    super::{
        resolver::{InputResolver, Resolution},
        user_index::UserIndex,
    },
    crate::{
        models::{sats, DeleteSpendable, SpendableOutput, TxStatus, MEMPOOL_HEIGHT},
        rpc::TxVerbose,
    },
};

/// Ledger deltas one transaction causes on the spendable-output set.
///
/// Computed once; the streaming entries push them into the out-streams,
/// the resync entry folds them into the batched payload.
#[derive(Debug, Default)]
pub struct LedgerDelta {
    pub created: Vec<SpendableOutput>,
    pub deleted: Vec<DeleteSpendable>,
}

/// Derive create records for tracked outputs and delete records for tracked
/// previous outputs this transaction consumed.
///
/// Delete records reference the previous transaction, because that is the
/// output leaving the spendable set.
pub fn ledger_delta(
    users: &UserIndex,
    resolver: &mut InputResolver,
    tx_verbose: &TxVerbose,
    block_height: i64,
) -> LedgerDelta {
    let mut delta = LedgerDelta::default();

    for out in &tx_verbose.vout {
        let Some(address) = out.script_pub_key.first_address() else {
            continue;
        };
        let Some(record) = users.lookup(address) else {
            continue;
        };

        let tx_status = if block_height == MEMPOOL_HEIGHT {
            TxStatus::MempoolIncoming
        } else {
            TxStatus::BlockIncoming
        };

        delta.created.push(SpendableOutput {
            tx_id: tx_verbose.txid.clone(),
            tx_out_id: out.n as i32,
            tx_out_amount: sats(out.value),
            tx_out_script: out.script_pub_key.hex.clone(),
            address: address.to_string(),
            user_id: record.user_id,
            tx_status,
            wallet_index: record.wallet_index,
            address_index: record.address_index,
        });
    }

    for input in &tx_verbose.vin {
        let prev = match resolver.resolve(input) {
            Resolution::Resolved(prev) => prev,
            Resolution::Coinbase | Resolution::Unavailable => continue,
        };
        let Some(address) = prev.addresses.first() else {
            continue;
        };
        let Some(record) = users.lookup(address) else {
            continue;
        };

        delta.deleted.push(DeleteSpendable {
            user_id: record.user_id,
            tx_id: prev.txid.clone(),
            address: address.clone(),
        });
    }

    delta
}
