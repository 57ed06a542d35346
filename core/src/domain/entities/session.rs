//! Server-side session records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Freshness tier of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Credentials were verified within `fresh_age`; sensitive operations may proceed
    Fresh,
    /// Valid, but sensitive operations require re-entering credentials
    Stale,
    /// Past `expires_at`
    Expired,
}

/// Session entity owned by the session manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session reference handed to the caller
    pub id: Uuid,

    /// Account this session authenticates
    pub account_id: Uuid,

    /// Timestamp of the credential check that opened the session
    pub created_at: DateTime<Utc>,

    /// Hard expiry; only ever moves forward
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last sliding renewal
    pub last_refreshed_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session expiring `ttl` after `now`
    pub fn new(account_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            created_at: now,
            expires_at: now + ttl,
            last_refreshed_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time since the session was opened
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Whether a refresh at `now` should slide the expiry forward
    pub fn needs_renewal(&self, now: DateTime<Utc>, update_age: Duration) -> bool {
        now - self.last_refreshed_at > update_age
    }

    pub fn state(&self, now: DateTime<Utc>, fresh_age: Duration) -> SessionState {
        if self.is_expired(now) {
            SessionState::Expired
        } else if self.age(now) <= fresh_age {
            SessionState::Fresh
        } else {
            SessionState::Stale
        }
    }

    /// Time remaining until expiry, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_735_689_600, 0).unwrap()
    }

    #[test]
    fn test_new_session_windows() {
        let account_id = Uuid::new_v4();
        let session = Session::new(account_id, t0(), Duration::days(7));

        assert_eq!(session.account_id, account_id);
        assert_eq!(session.expires_at, t0() + Duration::days(7));
        assert_eq!(session.last_refreshed_at, t0());
        assert_eq!(session.time_until_expiration(t0()), Duration::days(7));
    }

    #[test]
    fn test_expiry_is_exclusive_of_the_boundary() {
        let session = Session::new(Uuid::new_v4(), t0(), Duration::days(7));
        assert!(!session.is_expired(t0() + Duration::days(7)));
        assert!(session.is_expired(t0() + Duration::days(7) + Duration::seconds(1)));
    }

    #[test]
    fn test_state_tiers() {
        let fresh_age = Duration::minutes(5);
        let session = Session::new(Uuid::new_v4(), t0(), Duration::days(7));

        assert_eq!(session.state(t0() + Duration::minutes(5), fresh_age), SessionState::Fresh);
        assert_eq!(session.state(t0() + Duration::minutes(6), fresh_age), SessionState::Stale);
        assert_eq!(session.state(t0() + Duration::days(8), fresh_age), SessionState::Expired);
    }

    #[test]
    fn test_needs_renewal_after_update_age() {
        let session = Session::new(Uuid::new_v4(), t0(), Duration::days(7));
        assert!(!session.needs_renewal(t0() + Duration::hours(24), Duration::hours(24)));
        assert!(session.needs_renewal(t0() + Duration::hours(25), Duration::hours(24)));
    }
}
