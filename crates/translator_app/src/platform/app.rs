use std::sync::{mpsc, Arc};

use anyhow::{anyhow, Context as _};
use translator_core::{update, AppState, AppViewModel, Msg};
use translator_engine::{ClientSettings, EngineHandle, ReqwestTranslationClient};
use translator_logging::translator_info;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::{self, AppConfigStore};
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let settings = ClientSettings::from_env().context("invalid endpoint configuration")?;
    translator_info!(
        "Translate endpoint {}, validate endpoint {}",
        settings.translate_url,
        settings.validate_url
    );
    let client = ReqwestTranslationClient::new(settings).context("failed to build HTTP client")?;
    let engine = EngineHandle::new(Arc::new(client));
    let store = persistence::open_config_store();

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        ui::layout::native_options(),
        Box::new(move |cc| Box::new(TranslatorApp::new(cc.egui_ctx.clone(), engine, store))),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}

struct TranslatorApp {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    focus_input: bool,
}

impl TranslatorApp {
    fn new(ctx: egui::Context, engine: EngineHandle, store: AppConfigStore) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let initial_config = store.get().clone();
        let runner = EffectRunner::new(engine, store, msg_tx.clone(), ctx);

        let state = AppState::new();
        let mut app = Self {
            view: state.view(),
            state,
            runner,
            msg_rx,
            focus_input: true,
        };
        app.dispatch(Msg::ConfigLoaded(initial_config));
        app
    }

    /// Dispatches everything queued so far; returns whether anything was.
    fn process_pending_messages(&mut self) -> bool {
        let mut processed = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            processed = true;
        }
        processed
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        if self.runner.run(effects) {
            self.focus_input = true;
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        let focus_input = std::mem::take(&mut self.focus_input);
        for msg in ui::render::render(ctx, &self.view, focus_input) {
            self.dispatch(msg);
        }

        // Clipboard results arrive within the same frame.
        if self.process_pending_messages() || self.focus_input {
            ctx.request_repaint();
        }
    }
}
