pub use self::{
    dispatch::{streams, StreamReceivers, Streams},
    resolver::{InputResolver, PrevOutput, Resolution},
    spendable::LedgerDelta,
    status::Direction,
    user_index::UserIndex,
    zmq::zmq_listener,
};

mod dispatch;
mod enrich;
mod finalize;
mod mempool;
mod parser;
mod resolver;
mod spendable;
mod splitter;
mod status;
#[cfg(test)]
pub(crate) mod test_helpers;
mod user_index;
mod zmq;

use {
    crate::{
        models::{AddressToResync, ResyncBatch, ResyncTx, MEMPOOL_HEIGHT},
        rpc::{RpcGateway, TxVerbose},
    },
    bitcoin::BlockHash,
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    tracing::{debug, error, info},
};

/// The chain-watcher core. One instance is shared by all ingest drivers;
/// each transaction is processed start-to-finish on the calling worker.
pub struct Watcher {
    rpc: RpcGateway,
    users: UserIndex,
    streams: Streams,
    legacy_view_amount: bool,
    shutdown: Arc<AtomicBool>,
}

impl Watcher {
    pub fn new(
        rpc: RpcGateway,
        users: UserIndex,
        streams: Streams,
        legacy_view_amount: bool,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            rpc,
            users,
            streams,
            legacy_view_amount,
            shutdown,
        }
    }

    pub fn rpc(&self) -> &RpcGateway {
        &self.rpc
    }

    /// A transaction accepted into the mempool.
    pub fn on_mempool_tx(&self, tx_verbose: &TxVerbose) {
        let mut resolver = InputResolver::new(&self.rpc);

        let record = mempool::mempool_record(&mut resolver, tx_verbose);
        debug!(hash = %record.hash, fee_rate = record.fee_rate, "mempool record");

        self.process_transaction(&mut resolver, tx_verbose, MEMPOOL_HEIGHT);
    }

    /// A block connected to the chain. Emits one delete-mempool signal per
    /// txid before any per-tx work, then walks the block's transactions.
    pub fn on_new_block(&self, hash: &BlockHash) {
        let block = match self.rpc.block_verbose(hash) {
            Ok(block) => block,
            Err(err) => {
                error!("failed to fetch block {hash}: {err}");
                return;
            }
        };
        let txids = match self.rpc.block_txids(hash) {
            Ok(txids) => txids,
            Err(err) => {
                error!("failed to fetch raw block {hash}: {err}");
                return;
            }
        };
        info!(height = block.height, txs = txids.len(), "new block {hash}");

        for txid in &txids {
            self.streams.send_delete_mempool(txid.clone());
        }

        for txid in &txids {
            if self.shutdown.load(Ordering::SeqCst) {
                return;
            }
            let tx_verbose = match self.rpc.tx_verbose(txid) {
                Ok(tx) => tx,
                Err(err) => {
                    error!("failed to fetch block tx {txid}: {err}");
                    continue;
                }
            };
            let mut resolver = InputResolver::new(&self.rpc);
            self.process_transaction(&mut resolver, &tx_verbose, block.height);
        }
    }

    /// Replay a set of transactions for one address. Views and ledger
    /// deltas are collected into the returned batch instead of streamed.
    pub fn resync_addresses(&self, txs: &[ResyncTx], address: &AddressToResync) -> ResyncBatch {
        info!(
            "resyncing {} txs for address {} of user {}",
            txs.len(),
            address.address,
            address.user_id
        );
        let mut batch = ResyncBatch::default();

        for re_tx in txs {
            let tx_verbose = match self.rpc.tx_verbose(&re_tx.hash) {
                Ok(tx) => tx,
                Err(err) => {
                    error!("resync: failed to fetch tx {}: {err}", re_tx.hash);
                    continue;
                }
            };
            let mut resolver = InputResolver::new(&self.rpc);

            let delta = spendable::ledger_delta(
                &self.users,
                &mut resolver,
                &tx_verbose,
                re_tx.block_height,
            );
            batch.created.extend(delta.created);
            batch.deleted.extend(delta.deleted);

            let Some(mut tx) = parser::parse_raw_transaction(
                &self.users,
                &mut resolver,
                &tx_verbose,
                re_tx.block_height,
            ) else {
                continue;
            };
            tx.user_id = address.user_id.clone();
            enrich::enrich(&mut resolver, &mut tx, &tx_verbose, re_tx.block_height, true);

            for mut view in splitter::split(&self.rpc, &tx, re_tx.block_height) {
                finalize::finalize(&mut view, &tx_verbose);
                view.resync = true;
                batch.txs.push(view);
            }
        }

        batch
    }

    /// The shared inner pipeline: parse, enrich, split, finalize, dispatch.
    /// Ledger deltas go out only after every view of the transaction.
    fn process_transaction(
        &self,
        resolver: &mut InputResolver,
        tx_verbose: &TxVerbose,
        block_height: i64,
    ) {
        let Some(mut tx) =
            parser::parse_raw_transaction(&self.users, resolver, tx_verbose, block_height)
        else {
            return;
        };
        debug!(txid = %tx.tx_id, block_height, "processing tracked tx");

        enrich::enrich(resolver, &mut tx, tx_verbose, block_height, false);

        for mut view in splitter::split(&self.rpc, &tx, block_height) {
            finalize::finalize(&mut view, tx_verbose);
            if self.legacy_view_amount {
                dispatch::apply_legacy_amount(&mut view);
            }
            self.streams.send_transaction(view);
        }

        let delta =
            spendable::ledger_delta(&self.users, resolver, tx_verbose, block_height);
        self.streams.send_ledger(delta);
    }
}
