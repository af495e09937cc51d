//! Status stream using Server-Sent Events (SSE).
//!
//! Subscribes to the backend's `/api/status` endpoint. Every status event
//! the backend reports, refresh failures included, is handed to the callback.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::{StatusEvent, BACKEND_URL};

/// Parse one SSE payload.
pub fn parse_status_event(json: &str) -> Option<StatusEvent> {
    serde_json::from_str(json).ok()
}

/// Open the SSE connection. Call once at app startup.
pub fn init_status_stream(on_event: impl Fn(StatusEvent) + 'static) {
    let sse_url = format!("{}/api/status", BACKEND_URL);

    let event_source = match EventSource::new(&sse_url) {
        Ok(es) => es,
        Err(e) => {
            log::error!("Failed to create EventSource: {:?}", e);
            return;
        }
    };

    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Some(data) = event.data().as_string() {
            match parse_status_event(&data) {
                Some(status) => on_event(status),
                None => log::debug!("Ignoring SSE payload: {}", data),
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    event_source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::info!("📡 SSE connected to status stream");
    }) as Box<dyn FnMut(web_sys::Event)>);

    event_source.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::warn!("SSE connection error - will auto-reconnect");
    }) as Box<dyn FnMut(web_sys::Event)>);

    event_source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    // Lives for the whole page
    std::mem::forget(event_source);

    log::info!("📡 SSE status stream initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Operation, StatusLevel};

    #[test]
    fn test_parse_status_event() {
        let event = parse_status_event(
            r#"{"level":"error","operation":"refresh","message":"connection refused","at":"2026-03-01T10:15:00+00:00"}"#,
        )
        .unwrap();

        assert_eq!(event.level, StatusLevel::Error);
        assert_eq!(event.operation, Operation::Refresh);
    }

    #[test]
    fn test_parse_keep_alive() {
        assert!(parse_status_event("keep-alive").is_none());
    }
}
