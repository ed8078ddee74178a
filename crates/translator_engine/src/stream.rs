//! Incremental decoder for the translation endpoint's response body.
//!
//! The endpoint streams newline-delimited parts. Two framings are understood:
//!
//! * data-stream parts, `<code>:<json>`, where code `0` is a text delta and
//!   code `3` an error message;
//! * server-sent events, `data: <json>`, carrying either `{"content": ..}` or
//!   an OpenAI-style `{"choices":[{"delta":{"content": ..}}]}`.
//!
//! Everything else (finish/metadata parts, SSE comments, blank separators) is
//! skipped. Bytes are buffered until a full line is available, so network
//! chunk boundaries never split a part or a UTF-8 sequence.

use serde_json::Value;
use translator_logging::translator_trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPart {
    Text(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw body bytes and returns every part completed by them.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamPart> {
        self.buffer.extend_from_slice(bytes);
        let mut parts = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            parts.extend(parse_line(&line));
        }
        parts
    }

    /// Flushes a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Vec<StreamPart> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest).into_iter().collect()
    }
}

fn parse_line(raw: &[u8]) -> Option<StreamPart> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    if let Some(payload) = line.strip_prefix("data:") {
        return parse_event_data(payload.trim_start());
    }

    let part = line.split_once(':').and_then(|(code, payload)| match code {
        "0" => serde_json::from_str::<String>(payload)
            .ok()
            .filter(|text| !text.is_empty())
            .map(StreamPart::Text),
        "3" => serde_json::from_str::<String>(payload)
            .ok()
            .map(StreamPart::Error),
        _ => None,
    });
    if part.is_none() {
        translator_trace!("Skipping stream line ({} bytes)", line.len());
    }
    part
}

fn parse_event_data(payload: &str) -> Option<StreamPart> {
    if payload == "[DONE]" {
        return None;
    }
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => {
            translator_trace!("Skipping non-JSON event data ({} bytes)", payload.len());
            return None;
        }
    };

    if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
        let message = error
            .as_str()
            .or_else(|| error.get("message").and_then(Value::as_str))
            .unwrap_or("stream reported an error");
        return Some(StreamPart::Error(message.to_string()));
    }

    value
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/choices/0/delta/content").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(|text| StreamPart::Text(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> StreamPart {
        StreamPart::Text(value.to_string())
    }

    #[test]
    fn data_stream_text_parts() {
        let mut decoder = StreamDecoder::new();
        let parts = decoder.feed(b"f:{\"messageId\":\"m1\"}\n0:\"Hel\"\n0:\"lo\\n\"\ne:{}\nd:{}\n");
        assert_eq!(parts, vec![text("Hel"), text("lo\n")]);
    }

    #[test]
    fn lines_split_across_chunks() {
        let mut decoder = StreamDecoder::new();
        let body = "0:\"你好\"\n0:\"世界\"\n".as_bytes();
        // Split inside the first multi-byte character.
        let (a, b) = body.split_at(4);
        assert!(decoder.feed(a).is_empty());
        assert_eq!(decoder.feed(b), vec![text("你好"), text("世界")]);
    }

    #[test]
    fn error_part() {
        let mut decoder = StreamDecoder::new();
        let parts = decoder.feed(b"0:\"par\"\n3:\"Rate limit exceeded\"\n");
        assert_eq!(
            parts,
            vec![text("par"), StreamPart::Error("Rate limit exceeded".to_string())]
        );
    }

    #[test]
    fn server_sent_events() {
        let mut decoder = StreamDecoder::new();
        let body = concat!(
            ": keep-alive\n",
            "data: {\"content\":\"测试文本\",\"role\":\"assistant\"}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\" more\"}}]}\r\n\r\n",
            "data: [DONE]\n\n",
        );
        assert_eq!(
            decoder.feed(body.as_bytes()),
            vec![text("测试文本"), text(" more")]
        );
    }

    #[test]
    fn sse_error_object() {
        let mut decoder = StreamDecoder::new();
        let parts = decoder.feed(b"data: {\"error\":{\"message\":\"Invalid API key\"}}\n");
        assert_eq!(parts, vec![StreamPart::Error("Invalid API key".to_string())]);
    }

    #[test]
    fn null_error_field_is_not_an_error() {
        let mut decoder = StreamDecoder::new();
        let parts =
            decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}],\"error\":null}\n");
        assert_eq!(parts, vec![text("Hi")]);
    }

    #[test]
    fn unterminated_tail_is_flushed() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed(b"0:\"tail\"").is_empty());
        assert_eq!(decoder.finish(), vec![text("tail")]);
        assert!(decoder.finish().is_empty());
    }
}
