//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Request gateway to the StudentInfo REST backend."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Every backend call is a single HTTP round trip with no retry. Student and
//! contact mutations both come back as [`si_model::Outcome`], whatever
//! protocol the backend used to report them.
#![warn(missing_docs)]

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod http;

pub use endpoints::Endpoints;
pub use error::GatewayError;
pub use gateway::StudentGateway;
pub use http::HttpGateway;
