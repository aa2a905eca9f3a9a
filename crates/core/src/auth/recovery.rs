//! Password recovery throttling.

use chrono::{DateTime, Duration, Utc};

/// Minimum time between two recovery emails for the same account.
pub const RECOVERY_COOLDOWN: Duration = Duration::minutes(5);

/// Returns true if a recovery email was sent less than [`RECOVERY_COOLDOWN`] before `now`.
#[must_use]
pub fn recovery_cooldown_active(last_sent: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_sent.is_some_and(|sent| now - sent < RECOVERY_COOLDOWN)
}
