//! ---
//! si_section: "01-data-model"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Normalized mutation outcome and per-operation feedback text."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::student::StudentId;

/// Body returned by contact mutations when they succeed.
pub const LITERAL_SUCCESS: &str = "success";
/// Body returned by contact mutations when they fail.
pub const LITERAL_ERROR: &str = "error";

/// Every call the gateway can issue against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /students/list`
    ListStudents,
    /// `GET /students/search`
    SearchStudents,
    /// `GET /students/{id}`
    GetStudent,
    /// `POST /students/add`
    CreateStudent,
    /// `POST /students/update`
    UpdateStudent,
    /// `DELETE /students/{id}`
    DeleteStudent,
    /// `GET /contacts/student/{studentId}`
    ListContacts,
    /// `GET /contacts/{id}`
    GetContact,
    /// `POST /contacts/add`
    CreateContact,
    /// `PUT /contacts/update`
    UpdateContact,
    /// `DELETE /contacts/{id}`
    DeleteContact,
}

impl Operation {
    /// Stable identifier used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListStudents => "students.list",
            Operation::SearchStudents => "students.search",
            Operation::GetStudent => "students.get",
            Operation::CreateStudent => "students.create",
            Operation::UpdateStudent => "students.update",
            Operation::DeleteStudent => "students.delete",
            Operation::ListContacts => "contacts.list",
            Operation::GetContact => "contacts.get",
            Operation::CreateContact => "contacts.create",
            Operation::UpdateContact => "contacts.update",
            Operation::DeleteContact => "contacts.delete",
        }
    }

    /// True for calls that change backend state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateStudent
                | Operation::UpdateStudent
                | Operation::DeleteStudent
                | Operation::CreateContact
                | Operation::UpdateContact
                | Operation::DeleteContact
        )
    }

    /// Message shown when a mutation succeeds without a server message.
    pub fn success_text(&self) -> &'static str {
        match self {
            Operation::CreateStudent | Operation::UpdateStudent => "Student saved successfully!",
            Operation::DeleteStudent => "Student deleted successfully!",
            Operation::CreateContact | Operation::UpdateContact => "Contact saved successfully!",
            Operation::DeleteContact => "Contact deleted successfully!",
            Operation::ListStudents | Operation::SearchStudents => "Students loaded",
            Operation::GetStudent => "Student loaded",
            Operation::ListContacts => "Contacts loaded",
            Operation::GetContact => "Contact loaded",
        }
    }

    /// Message shown when the call fails and the server gave no usable message.
    pub fn failure_text(&self) -> &'static str {
        match self {
            Operation::ListStudents => "Error loading students. Check the log for details.",
            Operation::SearchStudents => "Error searching students",
            Operation::GetStudent => "Error loading student details",
            Operation::CreateStudent | Operation::UpdateStudent => "Error saving student!",
            Operation::DeleteStudent => "Error deleting student!",
            Operation::ListContacts => "Error loading contacts.",
            Operation::GetContact => "Error loading contact details",
            Operation::CreateContact | Operation::UpdateContact => "Error saving contact!",
            Operation::DeleteContact => "Error deleting contact!",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON envelope returned by student mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReply {
    /// Explicit success flag; a 2xx reply with `false` is still a failure.
    pub success: bool,
    /// Human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier assigned by `/students/add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
}

impl MutationReply {
    /// Successful reply carrying `message`.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            student_id: None,
        }
    }

    /// Failed reply carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            student_id: None,
        }
    }
}

/// Result of any mutation, whatever protocol the backend used to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the backend accepted the mutation.
    pub ok: bool,
    /// Text to show the user.
    pub message: String,
}

impl Outcome {
    /// Successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    /// Failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Normalize a structured student reply, filling in the operation's fallback text.
    pub fn from_reply(operation: Operation, reply: MutationReply) -> Self {
        let message = reply.message.filter(|m| !m.trim().is_empty());
        if reply.success {
            Self::success(message.unwrap_or_else(|| operation.success_text().to_owned()))
        } else {
            Self::failure(message.unwrap_or_else(|| operation.failure_text().to_owned()))
        }
    }

    /// Normalize a literal contact reply. Only the exact `success` body counts as success.
    pub fn from_literal(operation: Operation, body: &str) -> Self {
        if body.trim() == LITERAL_SUCCESS {
            Self::success(operation.success_text())
        } else {
            Self::failure(operation.failure_text())
        }
    }
}
