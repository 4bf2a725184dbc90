//! Relay of orchestrator events to the client as server-sent events.

use std::convert::Infallible;

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderName;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use jobfish_core::session_events::SessionEvent;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Stream every event from `rx` as one `data: <json>` frame.
///
/// The response ends when the orchestrator drops its sender. When the
/// client disconnects the receiver is dropped and later sends are
/// discarded by the sink.
pub fn relay(rx: mpsc::Receiver<SessionEvent>) -> Response {
    let stream = ReceiverStream::new(rx).map(|event| Ok::<_, Infallible>(to_frame(&event)));

    (
        [(CACHE_CONTROL, "no-cache"), (X_ACCEL_BUFFERING, "no")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
        .into_response()
}

fn to_frame(event: &SessionEvent) -> Event {
    Event::default().json_data(event).unwrap_or_else(|e| {
        tracing::error!(kind = event.kind(), error = %e, "Failed to serialize session event");
        Event::default().comment("serialization error")
    })
}
