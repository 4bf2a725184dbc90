//! Incremental server-sent-events decoding.
//!
//! Only `data:` lines carry events. Comment lines, `event:`/`id:` fields and
//! blank separators are ignored. Lines may be split across network chunks
//! and may end in `\n` or `\r\n`.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::AgentError;
use crate::messages::parse_event;
use crate::source::{AgentFrame, EventStream};

/// Prefix of an SSE data line.
const DATA_PREFIX: &str = "data:";

/// Splits a byte stream into complete lines.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    buffer: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Flush a trailing line that was never terminated.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.buffer);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Payload of a `data:` line, with one optional leading space removed.
///
/// Returns `None` for non-data lines and for empty payloads.
pub fn data_payload(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(DATA_PREFIX)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Turn one decoded line into a frame, if it carries one.
fn line_to_frame(line: &str) -> Option<AgentFrame> {
    let payload = data_payload(line)?;
    Some(match parse_event(payload) {
        Ok(event) => AgentFrame::Event(event),
        Err(err) => {
            tracing::warn!(error = %err, line = %payload, "Skipping malformed agent event");
            AgentFrame::Malformed {
                line: payload.to_string(),
                reason: err.0,
            }
        }
    })
}

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: SseLineDecoder,
    pending: VecDeque<AgentFrame>,
    finished: bool,
}

/// Decode an HTTP body into agent frames.
///
/// A body read error is yielded once as [`AgentError::Transport`] and ends
/// the stream. A clean end of body flushes any unterminated final line.
pub fn decode_frames<S, E>(body: S) -> EventStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = DecodeState {
        body: Box::pin(body),
        decoder: SseLineDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                return Some((Ok(frame), state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let lines = state.decoder.push(&chunk);
                    state
                        .pending
                        .extend(lines.iter().filter_map(|l| line_to_frame(l)));
                }
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(AgentError::Transport(err.to_string())), state));
                }
                None => {
                    state.finished = true;
                    if let Some(line) = state.decoder.finish() {
                        state.pending.extend(line_to_frame(&line));
                    }
                }
            }
        }
    })
    .boxed()
}
