use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokio::task::JoinHandle;
use translator_core::{AppConfig, JobId};
use translator_logging::{
    preview, translator_debug, translator_error, translator_info, translator_warn,
};

use crate::client::{ChannelStreamSink, TranslationClient};
use crate::EngineEvent;

enum EngineCommand {
    Translate {
        job_id: JobId,
        source_text: String,
        config: AppConfig,
    },
    Cancel {
        job_id: JobId,
    },
    Validate {
        request_id: u64,
        config: AppConfig,
    },
}

/// Runs requests on a background tokio runtime and reports back through an
/// event channel. Cloning shares the same runtime and channel.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn TranslationClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    translator_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };

            let mut in_flight: HashMap<JobId, JoinHandle<()>> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                in_flight.retain(|_, task| !task.is_finished());
                match command {
                    EngineCommand::Translate {
                        job_id,
                        source_text,
                        config,
                    } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        let task = runtime.spawn(async move {
                            run_translation(client.as_ref(), job_id, source_text, config, event_tx)
                                .await;
                        });
                        in_flight.insert(job_id, task);
                    }
                    EngineCommand::Cancel { job_id } => {
                        if let Some(task) = in_flight.remove(&job_id) {
                            task.abort();
                            translator_debug!("Job {} transport dropped", job_id);
                        }
                    }
                    EngineCommand::Validate { request_id, config } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = client.validate(&config).await;
                            if let Err(err) = &result {
                                translator_warn!("Validation request {} failed: {}", request_id, err);
                            }
                            let _ = event_tx.send(EngineEvent::Validated { request_id, result });
                        });
                    }
                }
            }
            translator_info!("Engine command channel closed; shutting down");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn translate(&self, job_id: JobId, source_text: impl Into<String>, config: AppConfig) {
        let _ = self.cmd_tx.send(EngineCommand::Translate {
            job_id,
            source_text: source_text.into(),
            config,
        });
    }

    /// Advisory: a cancelled job emits no further events, but events already
    /// queued may still arrive.
    pub fn cancel(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { job_id });
    }

    pub fn validate(&self, request_id: u64, config: AppConfig) {
        let _ = self.cmd_tx.send(EngineCommand::Validate { request_id, config });
    }

    /// Never blocks: `None` also when another clone is parked in [`recv`].
    ///
    /// [`recv`]: EngineHandle::recv
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }
}

async fn run_translation(
    client: &dyn TranslationClient,
    job_id: JobId,
    source_text: String,
    config: AppConfig,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    translator_info!(
        "Job {} translating {} chars with model {}",
        job_id,
        source_text.chars().count(),
        config.model
    );
    translator_debug!("Job {} source {:?}", job_id, preview(&source_text, 48));
    let sink = ChannelStreamSink::new(event_tx.clone());
    let event = match client.translate(job_id, &source_text, &config, &sink).await {
        Ok(()) => EngineEvent::Finished { job_id },
        Err(error) => {
            translator_warn!("Job {} failed: {}", job_id, error);
            EngineEvent::Failed { job_id, error }
        }
    };
    let _ = event_tx.send(event);
}
