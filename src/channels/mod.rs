//! Channel adapters — pure I/O, no business logic.
//!
//! Each adapter converts its gateway's native request shape into a
//! (phone, channel, text) triple for the engine and renders the engine's
//! reply in the gateway's native response shape.

pub mod cli;
pub mod sms;
pub mod ussd;

pub use cli::spawn_cli_channel;
pub use sms::sms_routes;
pub use ussd::ussd_routes;
