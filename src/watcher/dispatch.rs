use {
    super::spendable::LedgerDelta,
    crate::models::{DeleteMempool, DeleteSpendable, SpendableOutput, UserTx},
    tokio::sync::mpsc,
    tracing::warn,
};

/// Sending half of the four outbound event streams.
///
/// Each stream is a bounded channel; sends block when a consumer falls
/// behind, which is the backpressure on the ingest driver. Ordering is only
/// promised within one stream, in the order the producing worker emitted.
#[derive(Clone)]
pub struct Streams {
    transactions: mpsc::Sender<UserTx>,
    add_spendable: mpsc::Sender<SpendableOutput>,
    del_spendable: mpsc::Sender<DeleteSpendable>,
    del_mempool: mpsc::Sender<DeleteMempool>,
}

/// Receiving half, handed to the stream consumers.
pub struct StreamReceivers {
    pub transactions: mpsc::Receiver<UserTx>,
    pub add_spendable: mpsc::Receiver<SpendableOutput>,
    pub del_spendable: mpsc::Receiver<DeleteSpendable>,
    pub del_mempool: mpsc::Receiver<DeleteMempool>,
}

pub fn streams(capacity: usize) -> (Streams, StreamReceivers) {
    let (transactions_tx, transactions_rx) = mpsc::channel(capacity);
    let (add_tx, add_rx) = mpsc::channel(capacity);
    let (del_tx, del_rx) = mpsc::channel(capacity);
    let (mempool_tx, mempool_rx) = mpsc::channel(capacity);
    (
        Streams {
            transactions: transactions_tx,
            add_spendable: add_tx,
            del_spendable: del_tx,
            del_mempool: mempool_tx,
        },
        StreamReceivers {
            transactions: transactions_rx,
            add_spendable: add_rx,
            del_spendable: del_rx,
            del_mempool: mempool_rx,
        },
    )
}

impl Streams {
    pub fn send_transaction(&self, view: UserTx) {
        if self.transactions.blocking_send(view).is_err() {
            warn!("transaction stream closed, dropping view");
        }
    }

    pub fn send_ledger(&self, delta: LedgerDelta) {
        for created in delta.created {
            if self.add_spendable.blocking_send(created).is_err() {
                warn!("add-spendable stream closed, dropping delta");
            }
        }
        for deleted in delta.deleted {
            if self.del_spendable.blocking_send(deleted).is_err() {
                warn!("del-spendable stream closed, dropping delta");
            }
        }
    }

    pub fn send_delete_mempool(&self, hash: String) {
        if self.del_mempool.blocking_send(DeleteMempool { hash }).is_err() {
            warn!("delete-mempool stream closed, dropping signal");
        }
    }
}

/// Compatibility override carried over from the legacy streamer: recompute
/// the view amount from the flat echoes of the first touched address,
/// preferring inputs and falling back to outputs. Only an outgoing view
/// that kept change touches qualifies; disagrees with the net amount when a
/// wallet has several addresses on one side of the tx, so it is opt-in.
pub fn apply_legacy_amount(view: &mut UserTx) {
    if view.wallets_input.is_empty() || view.wallets_output.is_empty() {
        return;
    }
    let Some(first) = view.tx_address.first() else {
        return;
    };

    let mut amount: i64 = view
        .tx_inputs
        .iter()
        .filter(|input| &input.address == first)
        .map(|input| input.amount)
        .sum();
    if amount == 0 {
        amount = view
            .tx_outputs
            .iter()
            .filter(|output| &output.address == first)
            .map(|output| output.amount)
            .sum();
    }
    view.tx_out_amount = amount;
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::models::{AddressAmount, TxStatus, WalletTouch},
    };

    fn touch(address: &str, amount: i64) -> WalletTouch {
        WalletTouch {
            user_id: "u".to_string(),
            wallet_index: 0,
            address_index: 0,
            address: address.to_string(),
            amount,
            out_index: 0,
        }
    }

    fn outgoing_view() -> UserTx {
        UserTx {
            tx_status: TxStatus::BlockOutgoing,
            tx_out_amount: 71_000_000,
            tx_address: vec!["a".to_string()],
            tx_inputs: vec![AddressAmount::new("a", 100_000_000)],
            tx_outputs: vec![
                AddressAmount::new("x", 70_000_000),
                AddressAmount::new("b", 29_000_000),
            ],
            wallets_input: vec![touch("a", 100_000_000)],
            wallets_output: vec![touch("b", 29_000_000)],
            ..UserTx::default()
        }
    }

    #[test]
    fn legacy_amount_prefers_inputs_of_the_first_address() {
        let mut view = outgoing_view();
        apply_legacy_amount(&mut view);
        assert_eq!(view.tx_out_amount, 100_000_000);
    }

    #[test]
    fn legacy_amount_falls_back_to_outputs() {
        let mut view = outgoing_view();
        view.tx_address = vec!["b".to_string()];
        apply_legacy_amount(&mut view);
        assert_eq!(view.tx_out_amount, 29_000_000);
    }

    #[test]
    fn views_without_change_are_untouched() {
        let mut view = outgoing_view();
        view.wallets_output.clear();
        apply_legacy_amount(&mut view);
        assert_eq!(view.tx_out_amount, 71_000_000);
    }

    #[test]
    fn incoming_views_are_untouched() {
        let mut view = outgoing_view();
        view.wallets_input.clear();
        view.tx_status = TxStatus::BlockIncoming;
        view.tx_out_amount = 29_000_000;
        apply_legacy_amount(&mut view);
        assert_eq!(view.tx_out_amount, 29_000_000);
    }

    #[test]
    fn streams_deliver_in_emission_order() {
        let (streams, mut receivers) = streams(8);

        streams.send_delete_mempool("h1".to_string());
        streams.send_delete_mempool("h2".to_string());
        streams.send_transaction(outgoing_view());

        assert_eq!(receivers.del_mempool.try_recv().unwrap().hash, "h1");
        assert_eq!(receivers.del_mempool.try_recv().unwrap().hash, "h2");
        assert_eq!(
            receivers.transactions.try_recv().unwrap().tx_out_amount,
            71_000_000
        );
        assert!(receivers.transactions.try_recv().is_err());
    }
}
