use {
    super::user_index::UserIndex,
    crate::{
        models::OwnershipRecord,
        rpc::{
            BlockVerbose, NodeClient, Result, RpcError, RpcGateway, ScriptPubKey, TxVerbose,
            VinVerbose, VoutVerbose,
        },
    },
    bitcoin::BlockHash,
    rustc_hash::FxHashMap,
    std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// In-memory node for pipeline tests. Transactions are keyed by txid, blocks
/// by hash; `tx_fetches` counts `getrawtransaction` round-trips.
pub(crate) struct MockNode {
    tip: i64,
    txs: FxHashMap<String, TxVerbose>,
    blocks: FxHashMap<String, (BlockVerbose, Vec<String>)>,
    tx_fetches: Arc<AtomicUsize>,
}

impl MockNode {
    pub(crate) fn new(tip: i64) -> Self {
        Self {
            tip,
            txs: FxHashMap::default(),
            blocks: FxHashMap::default(),
            tx_fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn insert(&mut self, tx: TxVerbose) {
        self.txs.insert(tx.txid.clone(), tx);
    }

    pub(crate) fn insert_block(&mut self, hash: &BlockHash, height: i64, txids: Vec<String>) {
        let verbose = BlockVerbose {
            hash: hash.to_string(),
            height,
            time: 1_700_000_600,
            tx: txids.clone(),
        };
        self.blocks.insert(hash.to_string(), (verbose, txids));
    }

    pub(crate) fn tx_fetch_counter(&self) -> Arc<AtomicUsize> {
        self.tx_fetches.clone()
    }
}

impl NodeClient for MockNode {
    fn block_count(&self) -> Result<i64> {
        Ok(self.tip)
    }

    fn block_verbose(&self, hash: &BlockHash) -> Result<BlockVerbose> {
        self.blocks
            .get(&hash.to_string())
            .map(|(verbose, _)| verbose.clone())
            .ok_or_else(|| RpcError::NotFound(hash.to_string()))
    }

    fn block_txids(&self, hash: &BlockHash) -> Result<Vec<String>> {
        self.blocks
            .get(&hash.to_string())
            .map(|(_, txids)| txids.clone())
            .ok_or_else(|| RpcError::NotFound(hash.to_string()))
    }

    fn tx_verbose(&self, txid: &str) -> Result<TxVerbose> {
        self.tx_fetches.fetch_add(1, Ordering::SeqCst);
        self.txs
            .get(txid)
            .cloned()
            .ok_or_else(|| RpcError::NotFound(txid.to_string()))
    }
}

pub(crate) fn gateway(node: MockNode) -> RpcGateway {
    RpcGateway::new(Box::new(node))
}

pub(crate) fn tx_verbose(txid: &str, vin: Vec<VinVerbose>, vout: Vec<VoutVerbose>) -> TxVerbose {
    TxVerbose {
        txid: txid.to_string(),
        hash: format!("{txid}-w"),
        size: 250,
        time: Some(1_700_000_000),
        blocktime: Some(1_700_000_600),
        vin,
        vout,
    }
}

pub(crate) fn vin(prev_txid: &str, prev_vout: u32) -> VinVerbose {
    VinVerbose {
        txid: Some(prev_txid.to_string()),
        vout: Some(prev_vout),
        coinbase: None,
    }
}

pub(crate) fn vout(n: u32, value: f64, address: &str) -> VoutVerbose {
    VoutVerbose {
        value,
        n,
        script_pub_key: ScriptPubKey {
            hex: format!("0014{n:02x}"),
            address: Some(address.to_string()),
            addresses: vec![],
        },
    }
}

pub(crate) fn track(users: &UserIndex, address: &str, user: &str, wallet: i32, index: i32) {
    users.track(
        address,
        OwnershipRecord {
            user_id: user.to_string(),
            wallet_index: wallet,
            address_index: index,
        },
    );
}

pub(crate) fn block_hash(n: u8) -> BlockHash {
    use bitcoin::hashes::Hash;
    BlockHash::from_byte_array([n; 32])
}
