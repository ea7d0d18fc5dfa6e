use std::time::{Duration, Instant};

/// How long a raised alert stays fully visible.
pub const VISIBLE_FOR: Duration = Duration::from_millis(1500);
/// When a raised alert is removed entirely, measured from when it was raised.
pub const REMOVED_AFTER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Visible,
    /// Past the visible window, still present while it fades out.
    Fading,
    Cleared,
}

/// Transient error banner.
///
/// Raising a new message replaces the current one and restarts both
/// deadlines. Phases are derived from the clock, so nothing needs to be
/// scheduled to dismiss it.
#[derive(Debug, Clone, Default)]
pub struct Alert {
    current: Option<(String, Instant)>,
}

impl Alert {
    pub fn raise(&mut self, message: impl Into<String>) {
        self.raise_at(message, Instant::now());
    }

    pub fn raise_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn phase_at(&self, now: Instant) -> AlertPhase {
        match &self.current {
            None => AlertPhase::Cleared,
            Some((_, raised)) => {
                let age = now.saturating_duration_since(*raised);
                if age < VISIBLE_FOR {
                    AlertPhase::Visible
                } else if age < REMOVED_AFTER {
                    AlertPhase::Fading
                } else {
                    AlertPhase::Cleared
                }
            }
        }
    }

    /// The message if it has not yet been removed.
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        match self.phase_at(now) {
            AlertPhase::Cleared => None,
            _ => self.current.as_ref().map(|(m, _)| m.as_str()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    /// Milliseconds of visibility left, for the page's fade-out timer.
    pub fn visible_ms_left_at(&self, now: Instant) -> u64 {
        match &self.current {
            None => 0,
            Some((_, raised)) => {
                let age = now.saturating_duration_since(*raised);
                VISIBLE_FOR.saturating_sub(age).as_millis() as u64
            }
        }
    }
}
