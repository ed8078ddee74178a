use serde::Serialize;
use translator_core::AppConfig;

#[derive(Debug, Serialize)]
pub(crate) struct TranslatePayload<'a> {
    messages: [ChatMessage<'a>; 1],
    #[serde(rename = "apiConfig")]
    api_config: &'a AppConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> TranslatePayload<'a> {
    pub(crate) fn new(source_text: &'a str, api_config: &'a AppConfig) -> Self {
        Self {
            messages: [ChatMessage {
                role: "user",
                content: source_text,
            }],
            api_config,
        }
    }
}
