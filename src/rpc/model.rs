use serde::Deserialize;

/// `getrawtransaction` verbose result, trimmed to the fields the pipeline
/// reads. Amounts stay in decimal BTC (`f64`) until they are converted in
/// one place.
#[derive(Debug, Clone, Deserialize)]
pub struct TxVerbose {
    pub txid: String,
    pub hash: String,
    pub size: i64,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocktime: Option<i64>,
    pub vin: Vec<VinVerbose>,
    pub vout: Vec<VoutVerbose>,
}

/// One input of a verbose transaction. Coinbase inputs carry `coinbase`
/// instead of a previous outpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VinVerbose {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vout: Option<u32>,
    #[serde(default)]
    pub coinbase: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoutVerbose {
    pub value: f64,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

/// Script of an output. Nodes since 22.0 report a single `address`; older
/// nodes report `addresses`, which can hold several entries for bare
/// multi-sig scripts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptPubKey {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl ScriptPubKey {
    /// All addresses this script pays to, whichever field the node used.
    pub fn address_list(&self) -> Vec<&str> {
        match self.address.as_deref() {
            Some(address) => vec![address],
            None => self.addresses.iter().map(String::as_str).collect(),
        }
    }

    pub fn first_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or_else(|| self.addresses.first().map(String::as_str))
    }
}

/// `getblock` verbose result.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockVerbose {
    pub hash: String,
    pub height: i64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub tx: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_list_prefers_modern_field() {
        let script = ScriptPubKey {
            hex: "00".into(),
            address: Some("bc1qmodern".into()),
            addresses: vec!["legacy".into()],
        };
        assert_eq!(script.address_list(), vec!["bc1qmodern"]);
        assert_eq!(script.first_address(), Some("bc1qmodern"));
    }

    #[test]
    fn address_list_falls_back_to_legacy_multisig() {
        let script = ScriptPubKey {
            hex: "00".into(),
            address: None,
            addresses: vec!["one".into(), "two".into()],
        };
        assert_eq!(script.address_list(), vec!["one", "two"]);
        assert_eq!(script.first_address(), Some("one"));
    }

    #[test]
    fn scriptless_output_has_no_addresses() {
        let script = ScriptPubKey::default();
        assert!(script.address_list().is_empty());
        assert_eq!(script.first_address(), None);
    }

    #[test]
    fn tx_verbose_deserializes_node_shape() {
        let json = r#"{
            "txid": "aa",
            "hash": "bb",
            "size": 250,
            "time": 1700000000,
            "vin": [{"coinbase": "04ffff"}, {"txid": "cc", "vout": 1}],
            "vout": [{"value": 0.29, "n": 0, "scriptPubKey": {"hex": "76a9", "address": "addr"}}]
        }"#;
        let tx: TxVerbose = serde_json::from_str(json).unwrap();
        assert_eq!(tx.txid, "aa");
        assert_eq!(tx.blocktime, None);
        assert!(tx.vin[0].coinbase.is_some());
        assert_eq!(tx.vin[1].txid.as_deref(), Some("cc"));
        assert_eq!(tx.vout[0].script_pub_key.first_address(), Some("addr"));
    }
}
