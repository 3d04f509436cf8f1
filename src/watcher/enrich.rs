use {
    super::resolver::{InputResolver, Resolution},
    crate::{
        models::{sats, AddressAmount, UserTx, MEMPOOL_HEIGHT},
        rpc::TxVerbose,
    },
};

/// Second pass over a related transaction: the complete (not user-filtered)
/// input and output echoes, the fee, and the source timestamps.
///
/// Previous-tx lookups go through the same resolver the parser used, so no
/// RPC is repeated within one transaction.
pub fn enrich(
    resolver: &mut InputResolver,
    tx: &mut UserTx,
    tx_verbose: &TxVerbose,
    block_height: i64,
    resync: bool,
) {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut input_sum = 0f64;
    let mut output_sum = 0f64;

    for out in &tx_verbose.vout {
        for address in out.script_pub_key.address_list() {
            outputs.push(AddressAmount::new(address, sats(out.value)));
        }
        output_sum += out.value;
    }

    for input in &tx_verbose.vin {
        let prev = match resolver.resolve(input) {
            Resolution::Resolved(prev) => prev,
            Resolution::Coinbase | Resolution::Unavailable => continue,
        };
        for address in &prev.addresses {
            inputs.push(AddressAmount::new(address, sats(prev.value)));
        }
        input_sum += prev.value;
    }

    // The fee is summed in BTC and converted once to keep precision.
    tx.tx_fee = sats(input_sum - output_sum);

    if block_height == MEMPOOL_HEIGHT || resync {
        tx.mempool_time = tx_verbose.time.unwrap_or_default();
    }
    if block_height != MEMPOOL_HEIGHT {
        tx.block_time = tx_verbose.blocktime.unwrap_or_default();
    }

    tx.tx_inputs = inputs;
    tx.tx_outputs = outputs;
}
