//! Service contracts consumed by the application: identity and persistence.

pub mod identity;
pub mod persistence;

pub use identity::{AuthError, AuthEvent, AuthSession, IdentityProvider, LocalIdentityProvider};
pub use persistence::{
    PersistenceError, PersistenceService, WorkoutSessionRecord, DEFAULT_SESSION_LIMIT,
};
