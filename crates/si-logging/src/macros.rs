//! ---
//! si_section: "02-logging"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Context-enriched logging macros."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
/// Emit an informational log enriched with record context.
#[macro_export]
macro_rules! si_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::INFO,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a debug log enriched with record context.
#[macro_export]
macro_rules! si_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::DEBUG,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an error log enriched with record context.
#[macro_export]
macro_rules! si_error {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::ERROR,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::ERROR,
            operation = ctx.operation_str(),
            student = ctx.student_raw(),
            contact = ctx.contact_raw(),
            message = %format_args!($($arg)+)
        );
    }};
}
