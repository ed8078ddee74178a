use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use translator_core::{Effect, Msg, RequestFailure, Timer, ValidationOutcome};
use translator_engine::{EngineEvent, EngineHandle, FailureKind, RequestError};
use translator_logging::{translator_debug, translator_info, translator_warn};

use super::clipboard;
use super::persistence::{self, AppConfigStore};

/// Executes the effects `update` asks for and feeds results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: AppConfigStore,
    msg_tx: mpsc::Sender<Msg>,
    ctx: egui::Context,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        store: AppConfigStore,
        msg_tx: mpsc::Sender<Msg>,
        ctx: egui::Context,
    ) -> Self {
        let runner = Self {
            engine,
            store,
            msg_tx,
            ctx,
        };
        runner.spawn_event_loop();
        runner
    }

    /// Runs `effects` in order. Returns true when one of them asked for
    /// input focus.
    pub fn run(&mut self, effects: Vec<Effect>) -> bool {
        let mut focus_input = false;
        for effect in effects {
            match effect {
                Effect::StartTranslation {
                    job_id,
                    source_text,
                    config,
                } => {
                    translator_info!(
                        "StartTranslation job_id={} chars={} model={}",
                        job_id,
                        source_text.chars().count(),
                        config.model
                    );
                    self.engine.translate(job_id, source_text, config);
                }
                Effect::CancelTranslation { job_id } => {
                    translator_debug!("CancelTranslation job_id={}", job_id);
                    self.engine.cancel(job_id);
                }
                Effect::ScheduleTimer { timer, after } => self.schedule(timer, after),
                Effect::CopyToClipboard { text } => {
                    let result = clipboard::write_text(&self.ctx, &text);
                    if let Err(err) = &result {
                        translator_warn!("Clipboard write failed: {}", err);
                    }
                    let _ = self.msg_tx.send(Msg::ClipboardWritten { result });
                }
                Effect::PersistConfig { patch } => {
                    persistence::persist_patch(&mut self.store, patch);
                }
                Effect::ResetConfig => persistence::reset_to_default(&mut self.store),
                Effect::ValidateConfig { request_id, config } => {
                    translator_debug!("ValidateConfig request_id={}", request_id);
                    self.engine.validate(request_id, config);
                }
                Effect::FocusInput => focus_input = true,
            }
        }
        focus_input
    }

    fn schedule(&self, timer: Timer, after: Duration) {
        let msg_tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            thread::sleep(after);
            if msg_tx.send(Msg::TimerFired(timer)).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
                ctx.request_repaint();
            }
            translator_info!("Engine event loop stopped");
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Chunk { job_id, text } => Msg::ChunkReceived { job_id, text },
        EngineEvent::Finished { job_id } => Msg::StreamFinished { job_id },
        EngineEvent::Failed { job_id, error } => Msg::RequestFailed {
            job_id,
            failure: map_failure(error),
        },
        EngineEvent::Validated { request_id, result } => Msg::ValidationFinished {
            request_id,
            result: result
                .map(|response| ValidationOutcome {
                    valid: response.valid,
                    error: response.error,
                })
                .map_err(|err| err.message),
        },
    }
}

/// An in-band stream error arrived on a 200 response; everything else that
/// is not an HTTP status never got a usable response.
fn map_failure(error: RequestError) -> RequestFailure {
    match error.kind {
        FailureKind::HttpStatus(status) => RequestFailure::http(status, error.message),
        FailureKind::Stream => RequestFailure::http(200, error.message),
        FailureKind::Timeout => RequestFailure::timeout(error.message),
        FailureKind::Network | FailureKind::InvalidResponse | FailureKind::InvalidRequest => {
            RequestFailure::network(error.message)
        }
    }
}
