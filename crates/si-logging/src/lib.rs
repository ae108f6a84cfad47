//! ---
//! si_section: "02-logging"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Structured logging context, macros and lifecycle events."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
#![warn(missing_docs)]

use si_model::{ContactId, Operation, StudentId};
use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for development and tests.
///
/// Events go to stderr so command output on stdout stays clean.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext {
    /// Backend call the event belongs to.
    pub operation: Option<Operation>,
    /// Student the event concerns.
    pub student: Option<StudentId>,
    /// Contact the event concerns.
    pub contact: Option<ContactId>,
}

impl LogContext {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a backend call.
    pub fn for_operation(operation: Operation) -> Self {
        Self::new().with_operation(operation)
    }

    /// Attach the backend call.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Attach a student identifier.
    pub fn with_student(mut self, student: StudentId) -> Self {
        self.student = Some(student);
        self
    }

    /// Attach a contact identifier.
    pub fn with_contact(mut self, contact: ContactId) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Operation name, or an empty string.
    pub fn operation_str(&self) -> &'static str {
        self.operation.map(|op| op.as_str()).unwrap_or("")
    }

    /// Student identifier, or `-1` when absent.
    pub fn student_raw(&self) -> i64 {
        self.student.map(|id| id.0).unwrap_or(-1)
    }

    /// Contact identifier, or `-1` when absent.
    pub fn contact_raw(&self) -> i64 {
        self.contact.map(|id| id.0).unwrap_or(-1)
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed or was aborted.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Fault => "fault",
        }
    }

    fn is_fault(&self) -> bool {
        matches!(self, SystemEventOutcome::Fault)
    }
}

impl From<bool> for SystemEventOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            SystemEventOutcome::Success
        } else {
            SystemEventOutcome::Fault
        }
    }
}

/// Emit a standardized system event with a success/fault outcome.
pub fn log_system_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let fallback = LogContext::default();
    let ctx = context.unwrap_or(&fallback);
    // `tracing::event!` needs a constant level, so branch rather than pass it through.
    if outcome.is_fault() {
        tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %message
        );
    } else {
        tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_emit_without_panic() {
        init();
        let ctx = LogContext::for_operation(Operation::GetStudent).with_student(StudentId(3));
        si_info!(context = ctx.clone(), "student fetched");
        si_debug!("debug message");
        si_error!(context = ctx, "status code: {}", 500);
    }

    #[test]
    fn context_defaults_are_sentinels() {
        let ctx = LogContext::new();
        assert_eq!(ctx.operation_str(), "");
        assert_eq!(ctx.student_raw(), -1);
        let ctx = ctx.with_contact(ContactId(9));
        assert_eq!(ctx.contact_raw(), 9);
    }

    #[test]
    fn system_event_helper_emits() {
        init();
        let ctx = LogContext::for_operation(Operation::DeleteContact).with_contact(ContactId(2));
        log_system_event(
            Some(&ctx),
            "console.mutation",
            "contact deleted",
            SystemEventOutcome::Success,
        );
        log_system_event(
            None,
            "console.mutation",
            "backend unreachable",
            SystemEventOutcome::from(false),
        );
    }
}
