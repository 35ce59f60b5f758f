//! Identity provider contract and a local, in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::workouts::timer::{Clock, SystemClock};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Access token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

const EVENT_BUFFER: usize = 16;

/// A signed-in user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Authentication state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(AuthSession),
    SignedOut,
    TokenRefreshed(AuthSession),
    UserUpdated(Uuid),
}

/// Email/password identity provider.
pub trait IdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
    /// The current session, if any and not expired.
    fn get_session(&self) -> Option<AuthSession>;
    /// Subscribe to auth state changes.
    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthEvent>;
    /// Issue a fresh token for the current session.
    fn refresh_session(&self) -> Result<AuthSession, AuthError>;
}

struct Account {
    user_id: Uuid,
    password_hash: String,
}

#[derive(Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    session: Option<AuthSession>,
}

/// Identity provider keeping accounts in memory with bcrypt password hashes.
pub struct LocalIdentityProvider {
    state: Mutex<IdentityState>,
    events: broadcast::Sender<AuthEvent>,
    clock: Arc<dyn Clock>,
    hash_cost: u32,
    token_ttl: Duration,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::with_options(
            Arc::new(SystemClock),
            bcrypt::DEFAULT_COST,
            Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        )
    }

    pub fn with_options(clock: Arc<dyn Clock>, hash_cost: u32, token_ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            state: Mutex::new(IdentityState::default()),
            events,
            clock,
            hash_cost,
            token_ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, IdentityState>, AuthError> {
        self.state
            .lock()
            .map_err(|_| AuthError::Internal("identity state poisoned".to_string()))
    }

    fn issue(&self, user_id: Uuid, email: &str) -> AuthSession {
        AuthSession {
            user_id,
            email: email.to_string(),
            access_token: Uuid::new_v4(),
            expires_at: self.clock.now() + self.token_ttl,
        }
    }

    /// Tell subscribers that a user's profile data changed.
    pub fn notify_user_updated(&self, user_id: Uuid) {
        self.emit(AuthEvent::UserUpdated(user_id));
    }

    fn emit(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email)?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
        }

        let password_hash = bcrypt::hash(password, self.hash_cost)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let session = {
            let mut state = self.lock()?;
            if state.accounts.contains_key(&email) {
                return Err(AuthError::AlreadyRegistered(email));
            }
            let user_id = Uuid::new_v4();
            state.accounts.insert(
                email.clone(),
                Account {
                    user_id,
                    password_hash,
                },
            );
            let session = self.issue(user_id, &email);
            state.session = Some(session.clone());
            session
        };

        tracing::info!("Signed up {}", email);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email)?;

        let (user_id, password_hash) = {
            let state = self.lock()?;
            let account = state
                .accounts
                .get(&email)
                .ok_or(AuthError::InvalidCredentials)?;
            (account.user_id, account.password_hash.clone())
        };

        // bcrypt is slow on purpose; keep it outside the lock.
        let valid = bcrypt::verify(password, &password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !valid {
            tracing::debug!("Rejected sign-in for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.issue(user_id, &email);
        self.lock()?.session = Some(session.clone());

        tracing::info!("Signed in {}", email);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.lock()?.session.take().is_some();
        if had_session {
            tracing::info!("Signed out");
            self.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn get_session(&self) -> Option<AuthSession> {
        let now = self.clock.now();
        self.lock()
            .ok()?
            .session
            .clone()
            .filter(|s| !s.is_expired(now))
    }

    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn refresh_session(&self) -> Result<AuthSession, AuthError> {
        let session = {
            let mut state = self.lock()?;
            let current = state.session.as_ref().ok_or(AuthError::NoSession)?;
            let refreshed = self.issue(current.user_id, &current.email);
            state.session = Some(refreshed.clone());
            refreshed
        };

        tracing::debug!("Refreshed token for {}", session.user_id);
        self.emit(AuthEvent::TokenRefreshed(session.clone()));
        Ok(session)
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("No active session")]
    NoSession,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::timer::ManualClock;

    fn provider(clock: Arc<ManualClock>) -> LocalIdentityProvider {
        LocalIdentityProvider::with_options(clock, 4, Duration::minutes(5))
    }

    #[test]
    fn test_sign_up_then_sign_in() {
        let idp = provider(Arc::new(ManualClock::default()));
        let created = idp.sign_up("User@Example.com", "password123").unwrap();
        idp.sign_out().unwrap();
        assert!(idp.get_session().is_none());

        let session = idp.sign_in("user@example.com", "password123").unwrap();
        assert_eq!(session.user_id, created.user_id);
        assert_ne!(session.access_token, created.access_token);
        assert_eq!(idp.get_session(), Some(session));
    }

    #[test]
    fn test_rejects_bad_input() {
        let idp = provider(Arc::new(ManualClock::default()));
        assert!(matches!(
            idp.sign_up("not-an-email", "password123"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            idp.sign_up("a@b.co", "123"),
            Err(AuthError::WeakPassword(6))
        ));

        idp.sign_up("a@b.co", "password123").unwrap();
        assert!(matches!(
            idp.sign_up("a@b.co", "password123"),
            Err(AuthError::AlreadyRegistered(_))
        ));
        assert!(matches!(
            idp.sign_in("a@b.co", "wrong-pass"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            idp.sign_in("nobody@b.co", "password123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_session_expires_and_refreshes() {
        let clock = Arc::new(ManualClock::default());
        let idp = provider(clock.clone());
        idp.sign_up("a@b.co", "password123").unwrap();

        clock.advance_secs(301);
        assert!(idp.get_session().is_none());

        let refreshed = idp.refresh_session().unwrap();
        assert_eq!(idp.get_session(), Some(refreshed));
    }

    #[test]
    fn test_events_are_broadcast() {
        let idp = provider(Arc::new(ManualClock::default()));
        let mut rx = idp.on_auth_state_change();

        let session = idp.sign_up("a@b.co", "password123").unwrap();
        idp.refresh_session().unwrap();
        idp.sign_out().unwrap();
        // A second sign-out has nothing to report.
        idp.sign_out().unwrap();

        assert_eq!(rx.try_recv().unwrap(), AuthEvent::SignedIn(session.clone()));
        assert!(matches!(rx.try_recv().unwrap(), AuthEvent::TokenRefreshed(_)));
        assert_eq!(rx.try_recv().unwrap(), AuthEvent::SignedOut);
        assert!(rx.try_recv().is_err());

        idp.notify_user_updated(session.user_id);
        assert!(matches!(rx.try_recv().unwrap(), AuthEvent::UserUpdated(_)));
    }

    #[test]
    fn test_concurrent_sign_ins() {
        let idp = Arc::new(provider(Arc::new(ManualClock::default())));
        let created = idp.sign_up("a@b.co", "password123").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let idp = Arc::clone(&idp);
                std::thread::spawn(move || {
                    let password = if i % 2 == 0 { "password123" } else { "wrong-pass" };
                    let result = idp.sign_in("a@b.co", password);
                    // The state stays readable while hashes are checked.
                    let _ = idp.get_session();
                    result.is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 2);
        assert_eq!(idp.get_session().unwrap().user_id, created.user_id);
    }

    #[test]
    fn test_refresh_without_session() {
        let idp = provider(Arc::new(ManualClock::default()));
        assert!(matches!(idp.refresh_session(), Err(AuthError::NoSession)));
    }
}
