//! ---
//! si_section: "03-configuration"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Shared configuration and tracing primitives."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Configuration loading and tracing initialisation consumed by the console
//! and the control CLI.

pub mod config;
pub mod logging;

pub use config::{AppConfig, BackendConfig, LoadedAppConfig, LoggingConfig, UiConfig};
pub use logging::{init_tracing, LogFormat};
