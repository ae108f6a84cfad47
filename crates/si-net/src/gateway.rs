//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Backend operations consumed by the console and CLI."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use async_trait::async_trait;
use si_model::{Contact, ContactDraft, ContactId, Outcome, Student, StudentForm, StudentId};

use crate::error::GatewayError;

/// The backend as seen by the interaction layer.
///
/// Reads return records; mutations return an [`Outcome`] whose `ok` flag is
/// authoritative even when the HTTP status was 2xx.
#[async_trait]
pub trait StudentGateway: Send + Sync {
    /// All students, newest first as ordered by the backend.
    async fn list_students(&self) -> Result<Vec<Student>, GatewayError>;

    /// Students matching `keyword`. A blank keyword is the same call as
    /// [`StudentGateway::list_students`].
    async fn search_students(&self, keyword: &str) -> Result<Vec<Student>, GatewayError>;

    /// A single student, used to pre-populate the edit form.
    async fn get_student(&self, id: StudentId) -> Result<Student, GatewayError>;

    /// Submit a new student with optional uploads.
    async fn create_student(&self, form: &StudentForm) -> Result<Outcome, GatewayError>;

    /// Resubmit an existing student.
    async fn update_student(
        &self,
        id: StudentId,
        form: &StudentForm,
    ) -> Result<Outcome, GatewayError>;

    /// Delete a student and, on the backend, all of its contacts.
    async fn delete_student(&self, id: StudentId) -> Result<Outcome, GatewayError>;

    /// Contacts of one student.
    async fn list_contacts(&self, student: StudentId) -> Result<Vec<Contact>, GatewayError>;

    /// A single contact, used to pre-populate the edit sub-form.
    async fn get_contact(&self, id: ContactId) -> Result<Contact, GatewayError>;

    /// Create a contact; `draft.id` is ignored.
    async fn create_contact(&self, draft: &ContactDraft) -> Result<Outcome, GatewayError>;

    /// Update the contact identified by `draft.id`.
    async fn update_contact(&self, draft: &ContactDraft) -> Result<Outcome, GatewayError>;

    /// Delete a single contact.
    async fn delete_contact(&self, id: ContactId) -> Result<Outcome, GatewayError>;
}
