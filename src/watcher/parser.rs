use {
    super::{
        resolver::{InputResolver, Resolution},
        user_index::UserIndex,
    },
    crate::{
        models::{sats, UserTx, WalletTouch},
        rpc::TxVerbose,
    },
};

/// Build the skeleton of a [`UserTx`] from a verbose transaction: every
/// input and output is intersected with the user index, and each hit is
/// recorded as a wallet touch on the matching side.
///
/// `block_height` is -1 for mempool transactions. Returns `None` when no
/// tracked wallet is touched; unrelated transactions skip the rest of the
/// pipeline.
pub fn parse_raw_transaction(
    users: &UserIndex,
    resolver: &mut InputResolver,
    tx_verbose: &TxVerbose,
    block_height: i64,
) -> Option<UserTx> {
    let mut tx = UserTx {
        block_height,
        ..UserTx::default()
    };

    parse_inputs(users, resolver, tx_verbose, &mut tx);
    parse_outputs(users, tx_verbose, &mut tx);

    tx.is_related().then_some(tx)
}

fn parse_inputs(
    users: &UserIndex,
    resolver: &mut InputResolver,
    tx_verbose: &TxVerbose,
    tx: &mut UserTx,
) {
    for input in &tx_verbose.vin {
        let prev = match resolver.resolve(input) {
            Resolution::Resolved(prev) => prev,
            // Coinbase inputs spend nothing; unavailable ones were logged.
            Resolution::Coinbase | Resolution::Unavailable => continue,
        };

        for address in &prev.addresses {
            let Some(record) = users.lookup(address) else {
                continue;
            };
            tx.wallets_input.push(WalletTouch::new(
                record,
                address,
                sats(prev.value),
                prev.vout as i32,
            ));
            tx.tx_id = tx_verbose.txid.clone();
            tx.tx_hash = tx_verbose.hash.clone();
        }
    }
}

fn parse_outputs(users: &UserIndex, tx_verbose: &TxVerbose, tx: &mut UserTx) {
    for out in &tx_verbose.vout {
        for address in out.script_pub_key.address_list() {
            let Some(record) = users.lookup(address) else {
                continue;
            };
            tx.wallets_output
                .push(WalletTouch::new(record, address, sats(out.value), out.n as i32));
            tx.tx_id = tx_verbose.txid.clone();
            tx.tx_hash = tx_verbose.hash.clone();
        }
    }
}
