use {
    crate::rpc::{RpcError, RpcGateway, TxVerbose, VinVerbose},
    rustc_hash::FxHashMap,
    std::rc::Rc,
    tracing::warn,
};

/// Outcome of resolving one input against its previous transaction.
///
/// Resolution is best-effort: an unreachable or unknown previous tx yields
/// [`Resolution::Unavailable`] and the caller continues with the surviving
/// inputs.
#[derive(Debug)]
pub enum Resolution {
    Resolved(PrevOutput),
    Coinbase,
    Unavailable,
}

/// The previous output an input spends, with everything its raw form does
/// not carry: the spender's addresses and the decimal amount.
#[derive(Debug, Clone)]
pub struct PrevOutput {
    pub txid: String,
    pub vout: u32,
    pub addresses: Vec<String>,
    pub value: f64,
}

/// Fetches previous transactions for input resolution.
///
/// One resolver lives for one transaction's processing; previous txs are
/// cached so the parse, enrich and ledger passes don't re-issue the same
/// RPC. These lookups are most of the node traffic.
pub struct InputResolver<'a> {
    rpc: &'a RpcGateway,
    cache: FxHashMap<String, Rc<TxVerbose>>,
}

impl<'a> InputResolver<'a> {
    pub fn new(rpc: &'a RpcGateway) -> Self {
        Self {
            rpc,
            cache: FxHashMap::default(),
        }
    }

    pub fn resolve(&mut self, input: &VinVerbose) -> Resolution {
        let (Some(prev_txid), Some(prev_vout)) = (input.txid.as_deref(), input.vout) else {
            return Resolution::Coinbase;
        };

        let prev = match self.prev_tx(prev_txid) {
            Ok(tx) => tx,
            Err(err) => {
                warn!("failed to fetch previous tx {prev_txid}: {err}");
                return Resolution::Unavailable;
            }
        };

        let Some(out) = prev.vout.get(prev_vout as usize) else {
            warn!("previous tx {prev_txid} has no output {prev_vout}");
            return Resolution::Unavailable;
        };

        Resolution::Resolved(PrevOutput {
            txid: prev.txid.clone(),
            vout: prev_vout,
            addresses: out
                .script_pub_key
                .address_list()
                .into_iter()
                .map(str::to_string)
                .collect(),
            value: out.value,
        })
    }

    fn prev_tx(&mut self, txid: &str) -> Result<Rc<TxVerbose>, RpcError> {
        if let Some(tx) = self.cache.get(txid) {
            return Ok(tx.clone());
        }
        let tx = Rc::new(self.rpc.tx_verbose(txid)?);
        self.cache.insert(txid.to_string(), tx.clone());
        Ok(tx)
    }
}
