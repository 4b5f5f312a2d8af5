//! SMS webhook channel — one message in, one message out.
//!
//! Accepts the Africa's Talking inbound-SMS callback (form POST with `from`
//! and `text`). The reply is returned as the plain-text response body and,
//! when a gateway is configured, also pushed as an outbound SMS. Delivery
//! failures are logged and never fed back into the state machine.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::delivery::SmsGateway;
use crate::session::{ChannelKind, SessionEngine};

/// Inbound SMS callback payload.
#[derive(Debug, Deserialize)]
pub struct InboundSms {
    /// Sender phone number in international format.
    pub from: String,
    /// Message body.
    #[serde(default)]
    pub text: String,
}

#[derive(Clone)]
struct SmsState {
    engine: Arc<SessionEngine>,
    gateway: Option<Arc<dyn SmsGateway>>,
}

/// Build the `/sms` webhook router.
pub fn sms_routes(engine: Arc<SessionEngine>, gateway: Option<Arc<dyn SmsGateway>>) -> Router {
    let state = SmsState { engine, gateway };
    Router::new()
        .route("/sms", post(receive_sms))
        .with_state(state)
}

async fn receive_sms(State(state): State<SmsState>, Form(payload): Form<InboundSms>) -> String {
    let phone = payload.from.trim();
    info!(phone = %phone, chars = payload.text.len(), "Inbound SMS");

    let reply = match state
        .engine
        .handle_message(phone, ChannelKind::Sms, &payload.text)
        .await
    {
        Ok(reply) => reply.text,
        Err(e) => {
            error!(phone = %phone, error = %e, "Failed to process inbound SMS");
            state.engine.apology()
        }
    };

    // Fire-and-forget push through the gateway when one is configured.
    if let Some(gateway) = &state.gateway {
        let gateway = Arc::clone(gateway);
        let phone = phone.to_string();
        let text = reply.clone();
        tokio::spawn(async move {
            if let Err(e) = gateway.send(&phone, &text).await {
                warn!(phone = %phone, error = %e, "Outbound SMS delivery failed");
            }
        });
    }

    reply
}
