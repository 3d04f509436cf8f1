use {
    super::status::{classify, unix_now, Direction},
    crate::{models::UserTx, rpc::RpcGateway},
    tracing::error,
};

/// Partition one parsed transaction into per-wallet views.
///
/// One Bitcoin transaction may touch several tracked wallets at once; each
/// gets its own projection with its own direction, amount and status. A
/// wallet that appears on both sides produces exactly one outgoing view
/// which absorbs its change outputs, and no incoming view, so a
/// self-transfer is never counted twice.
pub fn split(rpc: &RpcGateway, tx: &UserTx, block_height: i64) -> Vec<UserTx> {
    let tip = match rpc.tip_height() {
        Ok(tip) => tip,
        Err(err) => {
            // Without the tip no view can be classified; the tx will be
            // seen again at the next block or resync.
            error!("failed to fetch tip height: {err}");
            return Vec::new();
        }
    };
    let delta = tip - block_height;
    let now = unix_now();

    let mut views: Vec<UserTx> = Vec::new();

    if !tx.wallets_input.is_empty() {
        let mut outgoing = tx.clone();
        // Keep only change outputs that land back in a spending wallet.
        outgoing.wallets_output = tx
            .wallets_output
            .iter()
            .filter(|out| tx.wallets_input.iter().any(|inp| inp.same_wallet(out)))
            .cloned()
            .collect();
        classify(&mut outgoing, delta, tip, Direction::Outgoing, now);
        views.push(outgoing);
    }

    for touch in &tx.wallets_output {
        // A handful of wallets per tx at most; the double loop stays.
        let covered = views.iter().any(|view| {
            view.wallets_input.iter().any(|inp| inp.same_wallet(touch))
                || view.wallets_output.iter().any(|out| out.same_wallet(touch))
        });
        if covered {
            continue;
        }

        let mut incoming = tx.clone();
        incoming.wallets_input = Vec::new();
        incoming.wallets_output = vec![touch.clone()];
        classify(&mut incoming, delta, tip, Direction::Incoming, now);
        views.push(incoming);
    }

    views
}
