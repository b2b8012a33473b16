#![forbid(unsafe_code)]

use crate::http::Response;
use crate::server::AppState;
use chores_core::StatusUpdate;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Body of `POST /api/update_status`. Absent or null fields fall through to
/// validation rather than failing the decode; anything but a JSON object does not.
#[derive(Debug, Deserialize)]
struct UpdateStatusPayload {
    #[serde(default)]
    task_id: Option<i64>,
    #[serde(default)]
    status: Option<String>,
}

pub(crate) fn update_status(state: &AppState, body: &[u8]) -> Response {
    let Some(payload) = decode_payload(body) else {
        return error_response("400 Bad Request", "invalid json payload");
    };

    let update = match StatusUpdate::parse(
        payload.task_id.unwrap_or(0),
        payload.status.as_deref().unwrap_or(""),
    ) {
        Ok(update) => update,
        Err(err) => return error_response("400 Bad Request", &err.to_string()),
    };

    let day = state.calendar().today();
    match state.with_store(|store| update.apply(store, day)) {
        Ok(()) => {
            tracing::info!(
                task_id = update.task_id.get(),
                day = %day,
                status = %update.status,
                "status updated"
            );
            Response::json("200 OK", &json!({ "ok": true }))
        }
        Err(err) => {
            tracing::error!(
                task_id = update.task_id.get(),
                day = %day,
                code = err.code(),
                error = %err,
                "update status failed"
            );
            error_response("500 Internal Server Error", "database error")
        }
    }
}

fn decode_payload(body: &[u8]) -> Option<UpdateStatusPayload> {
    // Derived struct decoding also takes a positional array; only objects count.
    let object = serde_json::from_slice::<Map<String, Value>>(body).ok()?;
    serde_json::from_value(Value::Object(object)).ok()
}

pub(crate) fn method_not_allowed() -> Response {
    error_response("405 Method Not Allowed", "method not allowed")
}

fn error_response(status: &'static str, message: &str) -> Response {
    Response::json(status, &json!({ "error": message }))
}
