use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};
use tokio_util::sync::CancellationToken;

use crate::{BookSource, LoadGeneration, LoaderEvent};

enum LoaderCommand {
    Start { generation: LoadGeneration },
    Cancel { generation: LoadGeneration },
}

type InFlight = Arc<Mutex<HashMap<LoadGeneration, CancellationToken>>>;

/// Runs book loads on a background tokio runtime.
///
/// Each load is tagged with the caller's generation and reported back through
/// [`LoaderEvent`]. Cancelled loads report nothing. Dropping the handle cancels
/// every load still in flight.
pub struct LoaderHandle {
    cmd_tx: Option<mpsc::Sender<LoaderCommand>>,
    event_rx: mpsc::Receiver<LoaderEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl LoaderHandle {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Could not start loader runtime: {}", err);
                    return;
                }
            };
            let in_flight: InFlight = Arc::default();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    LoaderCommand::Start { generation } => {
                        let token = CancellationToken::new();
                        lock(&in_flight).insert(generation, token.clone());
                        runtime.spawn(run_load(
                            source.clone(),
                            generation,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    LoaderCommand::Cancel { generation } => {
                        if let Some(token) = lock(&in_flight).remove(&generation) {
                            engine_info!("Cancelling load generation={}", generation);
                            token.cancel();
                        }
                    }
                }
            }

            for (_, token) in lock(&in_flight).drain() {
                token.cancel();
            }
            runtime.shutdown_timeout(Duration::from_millis(100));
        });

        Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn start(&self, generation: LoadGeneration) {
        self.send(LoaderCommand::Start { generation });
    }

    pub fn cancel(&self, generation: LoadGeneration) {
        self.send(LoaderCommand::Cancel { generation });
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoaderEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: LoaderCommand) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(command);
        }
    }
}

impl Drop for LoaderHandle {
    fn drop(&mut self) {
        // Closing the command channel makes the worker cancel and exit.
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

async fn run_load(
    source: Arc<dyn BookSource>,
    generation: LoadGeneration,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<LoaderEvent>,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => None,
        result = source.fetch_books() => Some(result),
    };
    lock(&in_flight).remove(&generation);

    match outcome {
        Some(result) => {
            let _ = event_tx.send(LoaderEvent::Completed { generation, result });
        }
        None => engine_debug!("Load generation={} cancelled", generation),
    }
}

fn lock(
    in_flight: &InFlight,
) -> std::sync::MutexGuard<'_, HashMap<LoadGeneration, CancellationToken>> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
