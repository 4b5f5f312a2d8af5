//! libSQL backend — async `SessionStore` implementation.
//!
//! Supports local file and in-memory databases. Every mutation targets a
//! statically known column derived from the closed `FieldUpdate` enum.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::session::model::{
    ChannelKind, FieldUpdate, Grade, Language, Level, Pathway, Rating, Session, Subject,
    SubjectScores, Term,
};
use crate::session::state::SessionState;
use crate::store::migrations;
use crate::store::traits::SessionStore;

/// libSQL session store.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&store.conn).await?;
        info!(path = %path.display(), "Session database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Pool(format!("Failed to create in-memory database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(&store.conn).await?;
        Ok(store)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

fn opt_int(n: Option<i64>) -> libsql::Value {
    match n {
        Some(n) => libsql::Value::Integer(n),
        None => libsql::Value::Null,
    }
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn state_to_json(state: &SessionState) -> Result<String, StoreError> {
    serde_json::to_string(state)
        .map_err(|e| StoreError::Serialization(format!("Failed to serialize state: {e}")))
}

fn state_from_json(s: &str) -> Result<SessionState, StoreError> {
    serde_json::from_str(s)
        .map_err(|e| StoreError::Serialization(format!("Failed to parse state {s:?}: {e}")))
}

/// Map a libsql row to a Session.
///
/// Column order matches SESSION_COLUMNS:
/// 0:phone, 1:channel, 2:language, 3:level, 4:grade, 5:term, 6:math,
/// 7:science, 8:social, 9:creative, 10:technical, 11:pathway,
/// 12:career_interest, 13:state, 14:created_at, 15:updated_at
fn row_to_session(row: &libsql::Row) -> Result<Session, StoreError> {
    let err = |e: libsql::Error| StoreError::Query(format!("row_to_session: {e}"));

    let phone: String = row.get(0).map_err(err)?;
    let channel_str: String = row.get(1).map_err(err)?;
    let language_str: String = row.get(2).map_err(err)?;
    let level_str: Option<String> = row.get(3).ok();
    let grade_num: Option<i64> = row.get(4).ok();
    let term_num: Option<i64> = row.get(5).ok();
    let rating = |idx: i32| -> Option<Rating> {
        let value: Option<i64> = row.get(idx).ok();
        value.and_then(|v| u8::try_from(v).ok()).and_then(Rating::from_value)
    };
    let pathway_str: Option<String> = row.get(11).ok();
    let career_interest: Option<String> = row.get(12).ok();
    let state_str: String = row.get(13).map_err(err)?;
    let created_str: String = row.get(14).map_err(err)?;
    let updated_str: String = row.get(15).map_err(err)?;

    let channel = ChannelKind::parse(&channel_str).ok_or_else(|| {
        StoreError::Serialization(format!("Unknown channel value: {channel_str:?}"))
    })?;

    Ok(Session {
        phone,
        channel,
        language: Language::from_code(&language_str).unwrap_or_default(),
        level: level_str.as_deref().and_then(Level::parse),
        grade: grade_num
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Grade::from_number),
        term: term_num
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Term::from_number),
        scores: SubjectScores {
            math: rating(6),
            science: rating(7),
            social: rating(8),
            creative: rating(9),
            technical: rating(10),
        },
        pathway: pathway_str.as_deref().and_then(Pathway::parse),
        career_interest,
        state: state_from_json(&state_str)?,
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

const SESSION_COLUMNS: &str = "phone, channel, language, level, grade, term, math, science, \
     social, creative, technical, pathway, career_interest, state, created_at, updated_at";

// ── Trait implementation ────────────────────────────────────────────

#[async_trait]
impl SessionStore for LibSqlStore {
    async fn get(
        &self,
        phone: &str,
        channel: ChannelKind,
    ) -> Result<Option<Session>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions WHERE phone = ?1 AND channel = ?2"
                ),
                params![phone, channel.as_str()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("get session: {e}")))?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::Query(format!("get session row: {e}")))?
        {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, session: &Session) -> Result<(), StoreError> {
        let state_json = state_to_json(&session.state)?;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO sessions ({SESSION_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
                ),
                params![
                    session.phone.as_str(),
                    session.channel.as_str(),
                    session.language.code(),
                    opt_text(session.level.map(|l| l.as_str())),
                    opt_int(session.grade.map(|g| g.number() as i64)),
                    opt_int(session.term.map(|t| t.number() as i64)),
                    opt_int(session.scores.math.map(|r| r.value() as i64)),
                    opt_int(session.scores.science.map(|r| r.value() as i64)),
                    opt_int(session.scores.social.map(|r| r.value() as i64)),
                    opt_int(session.scores.creative.map(|r| r.value() as i64)),
                    opt_int(session.scores.technical.map(|r| r.value() as i64)),
                    opt_text(session.pathway.map(|p| p.as_str())),
                    opt_text(session.career_interest.as_deref()),
                    state_json,
                    session.created_at.to_rfc3339(),
                    session.updated_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| StoreError::Query(format!("create session: {e}")))?;

        debug!(phone = %session.phone, channel = %session.channel, "Session created");
        Ok(())
    }

    async fn apply(
        &self,
        phone: &str,
        channel: ChannelKind,
        update: &FieldUpdate,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn();

        // Each variant maps to a fixed column — no runtime column names.
        let result = match update {
            FieldUpdate::Language(language) => {
                conn.execute(
                    "UPDATE sessions SET language = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![language.code(), now, phone, channel.as_str()],
                )
                .await
            }
            FieldUpdate::Level(level) => {
                conn.execute(
                    "UPDATE sessions SET level = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![level.as_str(), now, phone, channel.as_str()],
                )
                .await
            }
            FieldUpdate::Grade(grade) => {
                conn.execute(
                    "UPDATE sessions SET grade = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![grade.number() as i64, now, phone, channel.as_str()],
                )
                .await
            }
            FieldUpdate::Term(term) => {
                conn.execute(
                    "UPDATE sessions SET term = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![term.number() as i64, now, phone, channel.as_str()],
                )
                .await
            }
            FieldUpdate::Score(subject, rating) => {
                let sql = match subject {
                    Subject::Math => {
                        "UPDATE sessions SET math = ?1, updated_at = ?2 \
                         WHERE phone = ?3 AND channel = ?4"
                    }
                    Subject::Science => {
                        "UPDATE sessions SET science = ?1, updated_at = ?2 \
                         WHERE phone = ?3 AND channel = ?4"
                    }
                    Subject::Social => {
                        "UPDATE sessions SET social = ?1, updated_at = ?2 \
                         WHERE phone = ?3 AND channel = ?4"
                    }
                    Subject::Creative => {
                        "UPDATE sessions SET creative = ?1, updated_at = ?2 \
                         WHERE phone = ?3 AND channel = ?4"
                    }
                    Subject::Technical => {
                        "UPDATE sessions SET technical = ?1, updated_at = ?2 \
                         WHERE phone = ?3 AND channel = ?4"
                    }
                };
                conn.execute(sql, params![rating.value() as i64, now, phone, channel.as_str()])
                    .await
            }
            FieldUpdate::Pathway(pathway) => {
                conn.execute(
                    "UPDATE sessions SET pathway = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![pathway.as_str(), now, phone, channel.as_str()],
                )
                .await
            }
            FieldUpdate::CareerInterest(name) => {
                conn.execute(
                    "UPDATE sessions SET career_interest = ?1, updated_at = ?2 \
                     WHERE phone = ?3 AND channel = ?4",
                    params![name.as_str(), now, phone, channel.as_str()],
                )
                .await
            }
        };

        let affected = result.map_err(|e| StoreError::Query(format!("apply update: {e}")))?;
        if affected == 0 {
            return Err(StoreError::NotFound {
                phone: phone.to_string(),
                channel: channel.to_string(),
            });
        }
        Ok(())
    }

    async fn set_state(
        &self,
        phone: &str,
        channel: ChannelKind,
        state: &SessionState,
    ) -> Result<(), StoreError> {
        let state_json = state_to_json(state)?;
        let now = Utc::now().to_rfc3339();
        let affected = self
            .conn()
            .execute(
                "UPDATE sessions SET state = ?1, updated_at = ?2 \
                 WHERE phone = ?3 AND channel = ?4",
                params![state_json, now, phone, channel.as_str()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("set_state: {e}")))?;

        if affected == 0 {
            return Err(StoreError::NotFound {
                phone: phone.to_string(),
                channel: channel.to_string(),
            });
        }
        Ok(())
    }

    async fn reset(&self, phone: &str, channel: ChannelKind) -> Result<(), StoreError> {
        let state_json = state_to_json(&SessionState::LangSelect)?;
        let now = Utc::now().to_rfc3339();
        let affected = self
            .conn()
            .execute(
                "UPDATE sessions SET language = 'en', level = NULL, grade = NULL, \
                 term = NULL, math = NULL, science = NULL, social = NULL, \
                 creative = NULL, technical = NULL, pathway = NULL, \
                 career_interest = NULL, state = ?1, updated_at = ?2 \
                 WHERE phone = ?3 AND channel = ?4",
                params![state_json, now, phone, channel.as_str()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("reset session: {e}")))?;

        if affected == 0 {
            return Err(StoreError::NotFound {
                phone: phone.to_string(),
                channel: channel.to_string(),
            });
        }
        debug!(phone = %phone, channel = %channel, "Session reset");
        Ok(())
    }
}
