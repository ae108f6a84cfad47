//! ---
//! si_section: "01-data-model"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Student and contact records shared by the gateway, console and tooling."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Display-oriented copies of the records owned by the StudentInfo backend.
//! Nothing in this crate performs I/O; the gateway and the stub backend both
//! speak in these types so the wire format lives in one place.
#![warn(missing_docs)]

pub mod contact;
pub mod hints;
pub mod outcome;
pub mod student;

pub use contact::{Contact, ContactDraft, ContactId};
pub use hints::HintViolation;
pub use outcome::{MutationReply, Operation, Outcome, LITERAL_ERROR, LITERAL_SUCCESS};
pub use student::{fields, Student, StudentForm, StudentId, Upload};

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, folding blank values into `None`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Deserialize a string that the backend may send as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
