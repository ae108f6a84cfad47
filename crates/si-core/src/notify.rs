//! ---
//! si_section: "05-interaction-core"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Single-slot, auto-dismissing notification surface."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

use si_model::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// Holds at most one notification; showing a new one replaces the current.
#[derive(Debug, Clone)]
pub struct NotificationSurface {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationSurface {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn show(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification {
            severity,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(Severity::Success, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(Severity::Error, message, now);
    }

    pub fn show_outcome(&mut self, outcome: &Outcome, now: Instant) {
        let severity = if outcome.ok {
            Severity::Success
        } else {
            Severity::Error
        };
        self.show(severity, outcome.message.clone(), now);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notification once its delay has elapsed. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notification) if now >= notification.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_notification_replaces_first() {
        let now = Instant::now();
        let mut surface = NotificationSurface::new(Duration::from_secs(5));
        surface.success("Student saved successfully!", now);
        surface.error("Error deleting student!", now + Duration::from_secs(1));
        let current = surface.current().unwrap();
        assert_eq!(current.severity, Severity::Error);
        assert_eq!(current.message, "Error deleting student!");
    }

    #[test]
    fn expires_after_ttl_from_its_own_start() {
        let start = Instant::now();
        let mut surface = NotificationSurface::new(Duration::from_secs(5));
        surface.success("first", start);
        surface.success("second", start + Duration::from_secs(3));
        assert!(!surface.expire(start + Duration::from_secs(5)));
        assert!(surface.current().is_some());
        assert!(surface.expire(start + Duration::from_secs(8)));
        assert!(surface.current().is_none());
    }

    #[test]
    fn manual_dismiss_before_timeout() {
        let now = Instant::now();
        let mut surface = NotificationSurface::new(Duration::from_secs(5));
        surface.show_outcome(&Outcome::failure("Error saving contact!"), now);
        assert_eq!(surface.current().map(|n| n.severity), Some(Severity::Error));
        surface.dismiss();
        assert!(surface.current().is_none());
        assert!(!surface.expire(now + Duration::from_secs(10)));
    }
}
