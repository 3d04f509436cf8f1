pub use self::{
    resync::{AddressToResync, ResyncBatch, ResyncTx},
    spendable::{DeleteMempool, DeleteSpendable, MempoolRecord, SpendableOutput},
    transaction::{
        sats, AddressAmount, OwnershipRecord, TxStatus, UserTx, WalletTouch, MEMPOOL_HEIGHT,
        SATS_PER_BTC,
    },
};

mod resync;
mod spendable;
mod transaction;
