use {
    super::resolver::{InputResolver, Resolution},
    crate::{
        models::{MempoolRecord, SATS_PER_BTC},
        rpc::TxVerbose,
    },
};

/// Build the fee-rate record for a mempool transaction, in satoshis per
/// byte. Rounded half-up so a sub-satoshi rate does not collapse to zero.
pub fn mempool_record(resolver: &mut InputResolver, tx_verbose: &TxVerbose) -> MempoolRecord {
    let mut input_sum = 0f64;
    let mut output_sum = 0f64;

    for input in &tx_verbose.vin {
        if let Resolution::Resolved(prev) = resolver.resolve(input) {
            input_sum += prev.value;
        }
    }
    for out in &tx_verbose.vout {
        output_sum += out.value;
    }

    let rate = (input_sum - output_sum) / tx_verbose.size as f64 * SATS_PER_BTC;
    MempoolRecord {
        fee_rate: (rate + 0.5).floor() as i64,
        hash: tx_verbose.hash.clone(),
    }
}
