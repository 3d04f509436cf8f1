use {
    super::{BlockVerbose, NodeClient, Result, RpcError, TxVerbose},
    bitcoin::{BlockHash, Txid},
    bitcoincore_rpc::{jsonrpc, Client, RpcApi},
    std::str::FromStr,
};

/// Bitcoin Core's "invalid address or key" error, returned for unknown
/// transaction and block hashes.
const RPC_INVALID_ADDRESS_OR_KEY: i32 = -5;

/// Production [`NodeClient`] over a Bitcoin Core JSON-RPC connection.
///
/// Block-level calls use the typed API; verbose transactions go through a
/// raw call so the decimal amounts arrive as `f64` instead of being rounded
/// into a fixed-point type too early.
pub struct CoreClient {
    client: Client,
}

impl CoreClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl NodeClient for CoreClient {
    fn block_count(&self) -> Result<i64> {
        self.client
            .get_block_count()
            .map(|height| height as i64)
            .map_err(|err| map_rpc_err(err, "getblockcount"))
    }

    fn block_verbose(&self, hash: &BlockHash) -> Result<BlockVerbose> {
        self.client
            .call(
                "getblock",
                &[hash.to_string().into(), serde_json::json!(1)],
            )
            .map_err(|err| map_rpc_err(err, &hash.to_string()))
    }

    fn block_txids(&self, hash: &BlockHash) -> Result<Vec<String>> {
        let block = self
            .client
            .get_block(hash)
            .map_err(|err| map_rpc_err(err, &hash.to_string()))?;
        Ok(block
            .txdata
            .iter()
            .map(|tx| tx.compute_txid().to_string())
            .collect())
    }

    fn tx_verbose(&self, txid: &str) -> Result<TxVerbose> {
        let parsed = Txid::from_str(txid).map_err(|_| RpcError::BadHash(txid.to_string()))?;
        self.client
            .call(
                "getrawtransaction",
                &[parsed.to_string().into(), serde_json::json!(true)],
            )
            .map_err(|err| map_rpc_err(err, txid))
    }
}

fn map_rpc_err(err: bitcoincore_rpc::Error, what: &str) -> RpcError {
    match err {
        bitcoincore_rpc::Error::JsonRpc(jsonrpc::Error::Rpc(ref rpc))
            if rpc.code == RPC_INVALID_ADDRESS_OR_KEY =>
        {
            RpcError::NotFound(what.to_string())
        }
        other => RpcError::Unavailable(other.to_string()),
    }
}
