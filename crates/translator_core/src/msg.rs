use crate::{
    AppConfig, ConfigPatch, JobId, KeyPress, RequestFailure, Timer, ValidationOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the source text box.
    InputChanged(String),
    /// A key the input box cares about was pressed.
    KeyPressed(KeyPress),
    /// IME composition began; Enter must not submit until it ends.
    CompositionStarted,
    CompositionEnded,
    /// User asked to translate the current input.
    SubmitClicked,
    /// Fallback "Try Again": resubmit the last submitted text.
    RetryClicked,
    /// Logo or fallback "Clear & Reset".
    ResetClicked,
    /// Copy button next to the output.
    CopyClicked,
    /// Model selector changed; affects the next submission only.
    ModelSelected(String),
    /// Persisted configuration became available at startup.
    ConfigLoaded(AppConfig),
    SettingsOpened,
    SettingsClosed,
    SettingsDraftChanged(ConfigPatch),
    SettingsSaveClicked,
    SettingsValidateClicked,
    SettingsResetClicked,
    /// Validation endpoint answered, or the call itself failed.
    ValidationFinished {
        request_id: u64,
        result: Result<ValidationOutcome, String>,
    },
    /// Engine delivered a piece of translated text.
    ChunkReceived { job_id: JobId, text: String },
    /// Engine reached the end of the stream.
    StreamFinished { job_id: JobId },
    /// Engine gave up on the request.
    RequestFailed {
        job_id: JobId,
        failure: RequestFailure,
    },
    TimerFired(Timer),
    /// Outcome of a clipboard write.
    ClipboardWritten { result: Result<(), String> },
}
