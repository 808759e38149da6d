use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::sync::Arc;

/// Summary page: record count and the current server time
///
/// Storage failures answer 500 with the error text as a plain body.
pub async fn info(State(state): State<Arc<ServerState>>) -> Response {
    match state.store.count().await {
        Ok(count) => Html(render_info(count, &Local::now())).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to count persons");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

pub fn render_info<Tz>(count: u64, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "<p>Phonebook has info for {count} people<br/>{}</p>",
        format_timestamp(at)
    )
}

/// Locale-style timestamp, e.g. `10/16/2026, 3:04:05 PM`.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
