//! USSD webhook channel.
//!
//! Africa's Talking posts the whole input path on every callback as a
//! `*`-delimited chain ("1*3*2"); only the newest segment is the current
//! answer. Responses are framed with `CON` (keep the transport session
//! open) or `END` (terminate).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::session::{ChannelKind, SessionEngine, SessionState};

/// Inbound USSD callback payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundUssd {
    pub session_id: String,
    #[serde(default)]
    pub service_code: String,
    pub phone_number: String,
    /// Full `*`-delimited input chain; empty on session open.
    #[serde(default)]
    pub text: String,
}

/// The newest answer in a `*`-delimited input chain.
fn latest_segment(chain: &str) -> &str {
    chain.rsplit('*').next().unwrap_or("")
}

#[derive(Clone)]
struct UssdState {
    engine: Arc<SessionEngine>,
}

/// Build the `/ussd` webhook router.
pub fn ussd_routes(engine: Arc<SessionEngine>) -> Router {
    let state = UssdState { engine };
    Router::new()
        .route("/ussd", post(receive_ussd))
        .with_state(state)
}

async fn receive_ussd(State(state): State<UssdState>, Form(payload): Form<InboundUssd>) -> String {
    let phone = payload.phone_number.trim();
    let input = latest_segment(&payload.text);
    info!(
        phone = %phone,
        ussd_session = %payload.session_id,
        service_code = %payload.service_code,
        "Inbound USSD"
    );

    match state
        .engine
        .handle_message(phone, ChannelKind::Ussd, input)
        .await
    {
        Ok(reply) => {
            // The flow stays open until the assessment is done.
            let frame = if reply.state == SessionState::Done {
                "END"
            } else {
                "CON"
            };
            format!("{frame} {}", reply.text)
        }
        Err(e) => {
            error!(phone = %phone, error = %e, "Failed to process inbound USSD");
            format!("END {}", state.engine.apology())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_segment_takes_newest_answer() {
        assert_eq!(latest_segment(""), "");
        assert_eq!(latest_segment("1"), "1");
        assert_eq!(latest_segment("1*3*2"), "2");
        assert_eq!(latest_segment("1*2*what is stem?"), "what is stem?");
    }

    #[test]
    fn trailing_separator_means_empty_answer() {
        assert_eq!(latest_segment("1*2*"), "");
    }
}
