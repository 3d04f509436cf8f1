use {
    serde::Serialize,
    tokio::{
        select,
        sync::{mpsc, watch},
    },
    tracing::{error, info},
};

/// Drain one outbound stream to stdout as tab-separated JSON lines.
///
/// Stands in for the external transport: each event is encoded as one line
/// prefixed with the stream name. Exits when the stream closes or the
/// shutdown signal fires.
pub async fn drain<T: Serialize>(
    name: &'static str,
    mut receiver: mpsc::Receiver<T>,
    mut shutdown_rx: watch::Receiver<()>,
) {
    info!("{name} sink started");
    loop {
        select! {
            maybe_event = receiver.recv() => {
                match maybe_event {
                    Some(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{name}\t{line}"),
                        Err(err) => error!("failed to encode {name} event: {err}"),
                    },
                    None => {
                        info!("{name} sink: stream closed");
                        break;
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                info!("{name} sink: shutdown");
                break;
            }
        }
    }
}
