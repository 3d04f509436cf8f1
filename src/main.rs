use {
    clap::Parser,
    options::{Options, Settings},
    rpc::{CoreClient, RpcGateway},
    rustc_hash::FxHashMap,
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    tokio::signal::unix::{signal, SignalKind},
    tracing::{error, info},
    watcher::{streams, UserIndex, Watcher},
};

mod models;
mod options;
mod rpc;
mod sink;
mod watcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let options = Options::parse();
    let settings = Settings::from(options);

    // 1. Connect to the node
    let client = bitcoincore_rpc::Client::new(
        &settings.bitcoin_rpc_url,
        settings.bitcoin_rpc_auth.clone(),
    )?;
    let gateway = RpcGateway::new(Box::new(CoreClient::new(client)));

    // 2. Seed the ownership map
    let users = UserIndex::new();
    if let Some(path) = settings.tracked_addresses.as_ref() {
        let count = load_tracked_addresses(&users, path)?;
        info!("loaded {count} tracked addresses from {}", path.display());
    }

    // 3. Outbound streams and their consumers
    let (outbound, receivers) = streams(settings.stream_capacity);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(());
    let sink_handles = vec![
        tokio::spawn(sink::drain(
            "transactions",
            receivers.transactions,
            shutdown_rx.clone(),
        )),
        tokio::spawn(sink::drain(
            "add-spendable",
            receivers.add_spendable,
            shutdown_rx.clone(),
        )),
        tokio::spawn(sink::drain(
            "del-spendable",
            receivers.del_spendable,
            shutdown_rx.clone(),
        )),
        tokio::spawn(sink::drain(
            "delete-mempool",
            receivers.del_mempool,
            shutdown_rx.clone(),
        )),
    ];

    // 4. The watcher and its ZMQ ingest thread
    let shutdown = Arc::new(AtomicBool::new(false));
    let watcher = Arc::new(Watcher::new(
        gateway,
        users,
        outbound,
        settings.legacy_view_amount,
        shutdown.clone(),
    ));

    let zmq_handle = {
        let watcher = watcher.clone();
        let endpoint = settings.zmq_endpoint.clone();
        let shutdown = shutdown.clone();
        std::thread::spawn(move || {
            if let Err(err) = watcher::zmq_listener(watcher, &endpoint, shutdown) {
                error!("ZMQ listener failed: {err}");
            }
        })
    };

    // 5. Wait for SIGINT or SIGTERM
    wait_for_signals().await;
    info!("shutting down");

    shutdown.store(true, Ordering::SeqCst);
    let _ = shutdown_tx.send(());
    for handle in sink_handles {
        let _ = handle.await;
    }
    if zmq_handle.join().is_err() {
        error!("failed to join ZMQ listener thread");
    }

    info!("exited cleanly");
    Ok(())
}

fn load_tracked_addresses(
    users: &UserIndex,
    path: &std::path::Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    let records: FxHashMap<String, models::OwnershipRecord> =
        serde_json::from_reader(std::io::BufReader::new(file))?;
    let count = records.len();
    for (address, record) in records {
        users.track(address, record);
    }
    Ok(count)
}

async fn wait_for_signals() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            error!("failed to open signal stream: {err}");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("received SIGINT, shutting down...");
        }
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down...");
        }
    }
}
