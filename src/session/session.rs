use std::time::{Duration, Instant};

/// Default idle timeout after which an authenticated session re-locks
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Tracks whether the user is authenticated, with a sliding idle window
///
/// Expiry is lazy: there is no background timer. The UI polls
/// [`Session::is_authenticated`] (once per second is plenty) and re-locks
/// reactively; a poll arriving after the idle window has passed observes
/// the locked state on that very call.
///
/// Invariant: `authenticated` is only reported true while
/// `now - last_activity < idle_timeout`. Every authenticated check counts
/// as activity and slides the window forward.
#[derive(Debug)]
pub struct Session {
    authenticated: bool,
    last_activity: Instant,
    idle_timeout: Duration,
}

impl Session {
    /// Create a locked session with the default idle timeout
    pub fn new() -> Self {
        Self::with_timeout(IDLE_TIMEOUT)
    }

    /// Create a locked session with an explicit idle timeout
    pub fn with_timeout(idle_timeout: Duration) -> Self {
        Self {
            authenticated: false,
            last_activity: Instant::now(),
            idle_timeout,
        }
    }

    /// Mark the session authenticated and start the idle window
    ///
    /// Called only after a successful PIN verification.
    pub fn authenticate(&mut self) {
        self.authenticated = true;
        self.last_activity = Instant::now();
        log::debug!("session authenticated");
    }

    /// Check authentication, lazily expiring an idle session
    ///
    /// An unbroken idle gap of at least the timeout flips the session to
    /// locked as a side effect of the check. Otherwise the check itself
    /// refreshes the activity timestamp.
    pub fn is_authenticated(&mut self) -> bool {
        if !self.authenticated {
            return false;
        }

        let now = Instant::now();
        if now.duration_since(self.last_activity) >= self.idle_timeout {
            self.authenticated = false;
            log::info!("session expired after idle timeout");
            return false;
        }

        self.last_activity = now;
        true
    }

    /// Lock the session immediately, regardless of idle time
    pub fn logout(&mut self) {
        self.authenticated = false;
        log::debug!("session logged out");
    }

    /// The configured idle timeout
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
