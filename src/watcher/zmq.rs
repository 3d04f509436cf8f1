use {
    super::Watcher,
    bitcoin::{consensus::encode, Block, Transaction},
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    tracing::{debug, error, info},
    zmq::{Context, Error as ZmqError},
};

/// Blocking ingest loop over bitcoind's ZMQ publisher.
///
/// Raw transactions become mempool entries; raw blocks are handed over by
/// hash. Malformed frames log and the loop continues; the loop exits when
/// the shutdown flag is set.
pub fn zmq_listener(
    watcher: Arc<Watcher>,
    endpoint: &str,
    shutdown: Arc<AtomicBool>,
) -> Result<(), ZmqError> {
    let context = Context::new();
    let subscriber = context.socket(zmq::SUB)?;

    info!("connecting to ZMQ at {endpoint}");
    subscriber.connect(endpoint)?;
    subscriber.set_subscribe(b"rawblock")?;
    subscriber.set_subscribe(b"rawtx")?;
    debug!("subscribed to topics: rawblock, rawtx");

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        let topic_frame = subscriber.recv_msg(0)?;
        let Some(topic) = topic_frame.as_str() else {
            continue;
        };
        let payload_frame = subscriber.recv_msg(0)?;
        let payload = payload_frame.as_ref();

        match topic {
            "rawblock" => {
                if let Err(err) = handle_raw_block(&watcher, payload) {
                    error!("failed to handle raw block: {err}");
                }
            }
            "rawtx" => {
                if let Err(err) = handle_raw_tx(&watcher, payload) {
                    error!("failed to handle raw tx: {err}");
                }
            }
            other => {
                error!("unknown ZMQ topic: {other}");
            }
        }

        // Consume the sequence frame bitcoind may append.
        while subscriber.get_rcvmore()? {
            let _ = subscriber.recv_msg(0)?;
        }
    }

    info!("ZMQ listener closed");
    Ok(())
}

fn handle_raw_block(watcher: &Watcher, bytes: &[u8]) -> Result<(), encode::Error> {
    let block: Block = encode::deserialize(bytes)?;
    watcher.on_new_block(&block.block_hash());
    Ok(())
}

fn handle_raw_tx(watcher: &Watcher, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let tx: Transaction = encode::deserialize(bytes)?;
    let txid = tx.compute_txid();
    debug!("mempool tx {txid}");

    // The raw frame lacks prevout data; the verbose form drives the
    // pipeline.
    let tx_verbose = watcher.rpc().tx_verbose(&txid.to_string())?;
    watcher.on_mempool_tx(&tx_verbose);
    Ok(())
}
