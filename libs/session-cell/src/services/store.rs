use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use appointment_cell::services::AppointmentLedger;
use shared_config::AppConfig;
use shared_utils::clock::{Clock, SystemClock};
use shared_utils::ids::{IdGenerator, UuidIds};

use crate::models::{Intent, Outcome, SessionError, SessionState};
use crate::services::navigation::{reduce, Env};

struct LiveSession {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

/// Every live session, each an independent root state.
///
/// A session that has not been created or sent an intent within the idle
/// timeout is dropped the next time any session is created or dispatched to,
/// and reads of it report not found.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, LiveSession>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    offset: FixedOffset,
    seed_demo_appointment: bool,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
            ids,
            offset: config.clinic_offset(),
            seed_demo_appointment: config.seed_demo_appointment,
            idle_timeout: config.session_idle_timeout(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config, Arc::new(SystemClock), Arc::new(UuidIds))
    }

    /// The clinic's current calendar day.
    pub fn today(&self) -> NaiveDate {
        self.clock.today(self.offset)
    }

    pub fn ids(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.ids)
    }

    fn is_idle(&self, session: &LiveSession, now: DateTime<Utc>) -> bool {
        now - session.last_seen >= self.idle_timeout
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, LiveSession>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_idle(session, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle sessions ({} live)", evicted, sessions.len());
        }
    }

    pub async fn create(&self) -> (Uuid, SessionState) {
        let session_id = Uuid::new_v4();
        let appointments = if self.seed_demo_appointment {
            AppointmentLedger::seeded()
        } else {
            AppointmentLedger::empty()
        };
        let state = SessionState::new(appointments);
        let now = self.clock.now();

        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            session_id,
            LiveSession {
                state: state.clone(),
                last_seen: now,
            },
        );
        info!("Created session {} ({} live)", session_id, sessions.len());

        (session_id, state)
    }

    pub async fn get(&self, session_id: Uuid) -> Result<SessionState, SessionError> {
        let now = self.clock.now();

        self.sessions
            .read()
            .await
            .get(&session_id)
            .filter(|session| !self.is_idle(session, now))
            .map(|session| session.state.clone())
            .ok_or(SessionError::NotFound(session_id))
    }

    pub async fn remove(&self, session_id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        info!("Removed session {} ({} live)", session_id, sessions.len());

        Ok(())
    }

    /// Runs one intent through the reducer and stores the resulting state.
    pub async fn dispatch(
        &self,
        session_id: Uuid,
        intent: Intent,
    ) -> Result<(Outcome, SessionState), SessionError> {
        let now = self.clock.now();
        let env = Env {
            today: self.today(),
            fresh_id: self.ids.next_id(),
        };

        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);
        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        let reduced = reduce(std::mem::take(&mut session.state), intent, &env);
        session.state = reduced.state.clone();
        session.last_seen = now;
        debug!("Session {} now on {}", session_id, session.state.kind());

        Ok((reduced.outcome, reduced.state))
    }

    /// Sessions held in memory, idle ones not yet evicted included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
