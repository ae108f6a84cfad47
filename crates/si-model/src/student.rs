//! ---
//! si_section: "01-data-model"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Student record, identifier and multipart form."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::fmt;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{blank_as_none, null_as_empty};

/// Multipart field names understood by `/students/add` and `/students/update`.
pub mod fields {
    /// Identifier of the record being updated (update only).
    pub const ID: &str = "id";
    /// Student name.
    pub const NAME: &str = "name";
    /// Father's name.
    pub const FATHER_NAME: &str = "fatherName";
    /// Aadhar identifier.
    pub const AADHAR_NUMBER: &str = "aadharNumber";
    /// Profile photo upload part.
    pub const PROFILE_PHOTO_FILE: &str = "profilePhotoFile";
    /// Aadhar document upload part.
    pub const AADHAR_FILE: &str = "aadharFile";
}

/// Server-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(StudentId)
    }
}

/// Student record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Server-assigned identifier, immutable once created.
    pub id: StudentId,
    /// Student name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Father's name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub father_name: String,
    /// Twelve digit Aadhar identifier, when recorded.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub aadhar_number: Option<String>,
    /// Stored file name of the profile photo under `/uploads`.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_photo: Option<String>,
    /// Stored file name of the Aadhar document under `/uploads`.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub aadhar_path: Option<String>,
}

impl Student {
    /// Build a record with only the required fields populated.
    pub fn new(id: i64, name: impl Into<String>, father_name: impl Into<String>) -> Self {
        Self {
            id: StudentId(id),
            name: name.into(),
            father_name: father_name.into(),
            aadhar_number: None,
            profile_photo: None,
            aadhar_path: None,
        }
    }
}

/// A local file selected for upload alongside a student form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    path: PathBuf,
}

impl Upload {
    /// Reference the file at `path`; it is read when the form is submitted.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a form input, treating blank input as "no file selected".
    pub fn from_input(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| Self::new(trimmed))
    }

    /// Local path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Original file name sent with the multipart part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Fields submitted when creating or updating a student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    /// Student name.
    pub name: String,
    /// Father's name.
    pub father_name: String,
    /// Aadhar identifier; empty when not recorded.
    pub aadhar_number: String,
    /// Optional replacement profile photo.
    pub profile_photo: Option<Upload>,
    /// Optional replacement Aadhar document.
    pub aadhar_file: Option<Upload>,
}

impl StudentForm {
    /// Pre-populate a form from a fetched record. File inputs start empty.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            father_name: student.father_name.clone(),
            aadhar_number: student.aadhar_number.clone().unwrap_or_default(),
            profile_photo: None,
            aadhar_file: None,
        }
    }

    /// Text fields in submission order.
    pub fn text_fields(&self) -> [(&'static str, &str); 3] {
        [
            (fields::NAME, self.name.as_str()),
            (fields::FATHER_NAME, self.father_name.as_str()),
            (fields::AADHAR_NUMBER, self.aadhar_number.as_str()),
        ]
    }
}
