//! ---
//! si_section: "01-data-model"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Contact record and JSON draft."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::null_as_empty;
use crate::student::StudentId;

/// Server-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ContactId)
    }
}

/// Contact record belonging to exactly one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Server-assigned identifier.
    pub id: ContactId,
    /// Owning student.
    pub student_id: StudentId,
    /// Ten digit mobile number.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mob_no: String,
    /// City.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    /// Multi-line postal address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

/// JSON body sent to `/contacts/add` and `/contacts/update`.
///
/// `id` is `null` for a new contact. `student_id` always comes from the open
/// contact session, never from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    /// Identifier of the contact being edited, `None` when adding.
    pub id: Option<ContactId>,
    /// Owning student.
    pub student_id: StudentId,
    /// Ten digit mobile number.
    pub mob_no: String,
    /// City.
    pub city: String,
    /// Multi-line postal address.
    pub address: String,
}

impl ContactDraft {
    /// Empty draft for a new contact under `student_id`.
    pub fn new(student_id: StudentId) -> Self {
        Self {
            id: None,
            student_id,
            mob_no: String::new(),
            city: String::new(),
            address: String::new(),
        }
    }

    /// Draft pre-populated from a fetched contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id),
            student_id: contact.student_id,
            mob_no: contact.mob_no.clone(),
            city: contact.city.clone(),
            address: contact.address.clone(),
        }
    }

    /// True when the draft targets an existing contact.
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}
