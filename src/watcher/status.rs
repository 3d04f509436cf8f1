use {
    crate::models::{TxStatus, UserTx},
    std::time::{SystemTime, UNIX_EPOCH},
};

/// Which side of the transaction the view describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Set status, confirmation count and the time field of a view from its
/// confirmation depth.
///
/// `delta` is `tip - block_height`. A mempool transaction has height -1,
/// which makes `delta = tip + 1`; a height above the tip (a node that is
/// still catching up) is equally unconfirmed, so any delta outside
/// `0..=tip` lands in the mempool row.
pub fn classify(tx: &mut UserTx, delta: i64, tip: i64, direction: Direction, now: i64) {
    if delta > tip || delta < 0 {
        tx.confirmations = 0;
        tx.tx_status = match direction {
            Direction::Outgoing => TxStatus::MempoolOutgoing,
            Direction::Incoming => TxStatus::MempoolIncoming,
        };
        tx.mempool_time = now;
        tx.block_time = -1;
    } else if delta < 6 {
        tx.confirmations = (delta + 1) as i32;
        tx.tx_status = match direction {
            Direction::Outgoing => TxStatus::BlockOutgoing,
            Direction::Incoming => TxStatus::BlockIncoming,
        };
        tx.block_time = now;
    } else if delta < tip {
        tx.confirmations = (delta + 1) as i32;
        tx.tx_status = match direction {
            Direction::Outgoing => TxStatus::ConfirmedOutgoing,
            Direction::Incoming => TxStatus::ConfirmedIncoming,
        };
        // block_time keeps whatever the enrich pass read from the node.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIP: i64 = 100;
    const NOW: i64 = 1_700_000_900;

    fn classified(delta: i64, direction: Direction) -> UserTx {
        let mut tx = UserTx {
            block_time: 1_700_000_600,
            ..UserTx::default()
        };
        classify(&mut tx, delta, TIP, direction, NOW);
        tx
    }

    #[test]
    fn mempool_row() {
        let tx = classified(TIP + 1, Direction::Incoming);
        assert_eq!(tx.tx_status, TxStatus::MempoolIncoming);
        assert_eq!(tx.confirmations, 0);
        assert_eq!(tx.mempool_time, NOW);
        assert_eq!(tx.block_time, -1);

        let tx = classified(TIP + 1, Direction::Outgoing);
        assert_eq!(tx.tx_status, TxStatus::MempoolOutgoing);
        assert_eq!(tx.confirmations, 0);
    }

    #[test]
    fn height_above_tip_counts_as_mempool() {
        let tx = classified(-1, Direction::Incoming);
        assert_eq!(tx.tx_status, TxStatus::MempoolIncoming);
        assert_eq!(tx.confirmations, 0);
        assert_eq!(tx.block_time, -1);
    }

    #[test]
    fn fresh_block_row() {
        for delta in 0..6 {
            let tx = classified(delta, Direction::Incoming);
            assert_eq!(tx.tx_status, TxStatus::BlockIncoming, "delta {delta}");
            assert_eq!(tx.confirmations, (delta + 1) as i32);
            assert_eq!(tx.block_time, NOW);

            let tx = classified(delta, Direction::Outgoing);
            assert_eq!(tx.tx_status, TxStatus::BlockOutgoing, "delta {delta}");
        }
    }

    #[test]
    fn confirmed_row() {
        for delta in [6, 7, 50, TIP - 1] {
            let tx = classified(delta, Direction::Incoming);
            assert_eq!(tx.tx_status, TxStatus::ConfirmedIncoming, "delta {delta}");
            assert_eq!(tx.confirmations, (delta + 1) as i32);
            // The enrich pass already set block_time from the node.
            assert_eq!(tx.block_time, 1_700_000_600);

            let tx = classified(delta, Direction::Outgoing);
            assert_eq!(tx.tx_status, TxStatus::ConfirmedOutgoing, "delta {delta}");
        }
    }
}
