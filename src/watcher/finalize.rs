use {crate::models::UserTx, crate::rpc::TxVerbose};

/// Final shaping of a classified view: the net amount, the touched address
/// list, per-touch output indexes and the out-script.
///
/// For an outgoing view the amount is what left the wallet (inputs minus
/// absorbed change); for an incoming view it is the sum of the received
/// touches. The view's owner is the first non-empty user id on the driving
/// side, falling back to whatever the caller already assigned.
pub fn finalize(tx: &mut UserTx, tx_verbose: &TxVerbose) {
    if tx.tx_status.is_outgoing() {
        let mut amount = 0;
        for input in &tx.wallets_input {
            amount += input.amount;
            tx.tx_address.push(input.address.clone());
        }
        tx.tx_out_amount += amount;

        for i in 0..tx.wallets_output.len() {
            tx.tx_out_amount -= tx.wallets_output[i].amount;
            fill_out_index(tx, i, tx_verbose);
        }
    } else {
        for i in 0..tx.wallets_output.len() {
            tx.tx_out_amount += tx.wallets_output[i].amount;
            let address = tx.wallets_output[i].address.clone();
            tx.tx_address.push(address);
            fill_out_index(tx, i, tx_verbose);
        }
    }

    let side = if tx.tx_status.is_outgoing() {
        &tx.wallets_input
    } else {
        &tx.wallets_output
    };
    if let Some(touch) = side.iter().find(|touch| !touch.user_id.is_empty()) {
        tx.user_id = touch.user_id.clone();
    }
}

/// Match the touch's address against the verbose outputs to recover its
/// output index, and take that output's script as the view script.
fn fill_out_index(tx: &mut UserTx, i: usize, tx_verbose: &TxVerbose) {
    for out in &tx_verbose.vout {
        for address in out.script_pub_key.address_list() {
            if tx.wallets_output[i].address == address {
                tx.wallets_output[i].out_index = out.n as i32;
                tx.tx_out_script = out.script_pub_key.hex.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            models::{TxStatus, WalletTouch},
            watcher::test_helpers::{tx_verbose, vout},
        },
    };

    fn touch(user: &str, wallet: i32, address: &str, amount: i64) -> WalletTouch {
        WalletTouch {
            user_id: user.to_string(),
            wallet_index: wallet,
            address_index: 0,
            address: address.to_string(),
            amount,
            out_index: -1,
        }
    }

    #[test]
    fn outgoing_view_nets_inputs_against_change() {
        let verbose = tx_verbose(
            "tx1",
            vec![],
            vec![vout(0, 0.7, "x"), vout(1, 0.29, "change")],
        );
        let mut view = UserTx {
            tx_status: TxStatus::ConfirmedOutgoing,
            wallets_input: vec![touch("u", 0, "a", 100_000_000)],
            wallets_output: vec![touch("u", 0, "change", 29_000_000)],
            ..UserTx::default()
        };

        finalize(&mut view, &verbose);

        assert_eq!(view.tx_out_amount, 71_000_000);
        assert_eq!(view.tx_address, vec!["a".to_string()]);
        assert_eq!(view.wallets_output[0].out_index, 1);
        assert_eq!(view.tx_out_script, "001401");
        assert_eq!(view.user_id, "u");
    }

    #[test]
    fn incoming_view_sums_received_touches() {
        let verbose = tx_verbose("tx1", vec![], vec![vout(0, 0.5, "a")]);
        let mut view = UserTx {
            tx_status: TxStatus::BlockIncoming,
            wallets_output: vec![touch("u", 0, "a", 50_000_000)],
            ..UserTx::default()
        };

        finalize(&mut view, &verbose);

        assert_eq!(view.tx_out_amount, 50_000_000);
        assert_eq!(view.tx_address, vec!["a".to_string()]);
        assert_eq!(view.wallets_output[0].out_index, 0);
        assert_eq!(view.tx_out_script, "001400");
        assert_eq!(view.user_id, "u");
    }

    #[test]
    fn outgoing_without_change_keeps_full_amount() {
        let verbose = tx_verbose("tx1", vec![], vec![vout(0, 0.99, "elsewhere")]);
        let mut view = UserTx {
            tx_status: TxStatus::MempoolOutgoing,
            wallets_input: vec![touch("u", 0, "a", 100_000_000)],
            ..UserTx::default()
        };

        finalize(&mut view, &verbose);

        assert_eq!(view.tx_out_amount, 100_000_000);
        assert!(view.tx_out_script.is_empty());
    }

    #[test]
    fn assigned_user_survives_when_touches_carry_none() {
        let verbose = tx_verbose("tx1", vec![], vec![vout(0, 0.1, "a")]);
        let mut view = UserTx {
            user_id: "from-resync".to_string(),
            tx_status: TxStatus::ConfirmedIncoming,
            wallets_output: vec![touch("", 0, "a", 10_000_000)],
            ..UserTx::default()
        };

        finalize(&mut view, &verbose);
        assert_eq!(view.user_id, "from-resync");
    }
}
