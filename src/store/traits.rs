//! `SessionStore` — single async interface for session persistence.
//!
//! Mutations go through the closed `FieldUpdate` enum plus dedicated state
//! and reset operations, so every write maps to a statically known column.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::session::model::{ChannelKind, FieldUpdate, Session};
use crate::session::state::SessionState;

/// Backend-agnostic session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session, or `None` for an unknown (phone, channel).
    async fn get(
        &self,
        phone: &str,
        channel: ChannelKind,
    ) -> Result<Option<Session>, StoreError>;

    /// Insert a freshly created session. Fails if the row already exists.
    async fn create(&self, session: &Session) -> Result<(), StoreError>;

    /// Persist a single field mutation.
    async fn apply(
        &self,
        phone: &str,
        channel: ChannelKind,
        update: &FieldUpdate,
    ) -> Result<(), StoreError>;

    /// Persist the machine state.
    async fn set_state(
        &self,
        phone: &str,
        channel: ChannelKind,
        state: &SessionState,
    ) -> Result<(), StoreError>;

    /// Restart: clear every collected field, keep the identity key, and
    /// return the session to language selection. The row is never deleted.
    async fn reset(&self, phone: &str, channel: ChannelKind) -> Result<(), StoreError>;
}
