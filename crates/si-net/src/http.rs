//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "reqwest implementation of the student gateway."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use si_common::BackendConfig;
use si_logging::{log_system_event, si_debug, si_error, LogContext, SystemEventOutcome};
use si_model::{
    fields, Contact, ContactDraft, ContactId, MutationReply, Operation, Outcome, Student,
    StudentForm, StudentId,
};

use crate::endpoints::Endpoints;
use crate::error::GatewayError;
use crate::gateway::StudentGateway;

/// Gateway that talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoints: Endpoints,
}

impl HttpGateway {
    /// Build a gateway with the configured base URL and per-request timeout.
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::from_reqwest)?;
        Ok(Self::with_client(client, Endpoints::new(config.base())))
    }

    /// Build a gateway around an existing client.
    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// URL layout this gateway targets.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(
        &self,
        context: &LogContext,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        si_debug!(context = context, "dispatching request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = GatewayError::from_reqwest(err);
                si_error!(context = context, "request failed: {err}");
                return Err(err);
            }
        };
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // A structured body on a non-2xx status still carries the reason.
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<MutationReply>(&body)
            .ok()
            .and_then(|reply| reply.message)
            .filter(|message| !message.trim().is_empty());
        si_error!(
            context = context,
            "backend responded with HTTP {} ({})",
            status.as_u16(),
            detail.as_deref().unwrap_or("no detail")
        );
        Err(GatewayError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        context: &LogContext,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = self.send(context, request).await?;
        let body = response.text().await.map_err(GatewayError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|err| {
            si_error!(context = context, "unable to decode response: {err}");
            GatewayError::Decode(err.to_string())
        })
    }

    async fn fetch_text(
        &self,
        context: &LogContext,
        request: RequestBuilder,
    ) -> Result<String, GatewayError> {
        let response = self.send(context, request).await?;
        response.text().await.map_err(GatewayError::from_reqwest)
    }

    async fn structured_mutation(
        &self,
        operation: Operation,
        context: LogContext,
        request: RequestBuilder,
    ) -> Result<Outcome, GatewayError> {
        let reply: MutationReply = self.fetch_json(&context, request).await?;
        let outcome = Outcome::from_reply(operation, reply);
        record_outcome(&context, &outcome);
        Ok(outcome)
    }

    async fn literal_mutation(
        &self,
        operation: Operation,
        context: LogContext,
        request: RequestBuilder,
    ) -> Result<Outcome, GatewayError> {
        let body = self.fetch_text(&context, request).await?;
        let outcome = Outcome::from_literal(operation, &body);
        record_outcome(&context, &outcome);
        Ok(outcome)
    }
}

fn record_outcome(context: &LogContext, outcome: &Outcome) {
    log_system_event(
        Some(context),
        context.operation_str(),
        &outcome.message,
        SystemEventOutcome::from(outcome.ok),
    );
}

/// Assemble the multipart body. Uploads are read up front so an unreadable
/// file fails the call before anything is sent.
async fn student_multipart(
    id: Option<StudentId>,
    form: &StudentForm,
) -> Result<Form, GatewayError> {
    let mut multipart = Form::new();
    if let Some(id) = id {
        multipart = multipart.text(fields::ID, id.to_string());
    }
    for (name, value) in form.text_fields() {
        multipart = multipart.text(name, value.to_owned());
    }
    let uploads = [
        (fields::PROFILE_PHOTO_FILE, form.profile_photo.as_ref()),
        (fields::AADHAR_FILE, form.aadhar_file.as_ref()),
    ];
    for (name, upload) in uploads {
        let Some(upload) = upload else { continue };
        let bytes = tokio::fs::read(upload.path())
            .await
            .map_err(|source| GatewayError::Upload {
                path: upload.path().to_path_buf(),
                source,
            })?;
        multipart = multipart.part(name, Part::bytes(bytes).file_name(upload.file_name()));
    }
    Ok(multipart)
}

#[async_trait]
impl StudentGateway for HttpGateway {
    async fn list_students(&self) -> Result<Vec<Student>, GatewayError> {
        let context = LogContext::for_operation(Operation::ListStudents);
        let students: Option<Vec<Student>> = self
            .fetch_json(&context, self.client.get(self.endpoints.students_list()))
            .await?;
        Ok(students.unwrap_or_default())
    }

    async fn search_students(&self, keyword: &str) -> Result<Vec<Student>, GatewayError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_students().await;
        }
        let context = LogContext::for_operation(Operation::SearchStudents);
        let request = self
            .client
            .get(self.endpoints.students_search())
            .query(&[("keyword", keyword)]);
        let students: Option<Vec<Student>> = self.fetch_json(&context, request).await?;
        Ok(students.unwrap_or_default())
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, GatewayError> {
        let context = LogContext::for_operation(Operation::GetStudent).with_student(id);
        let student: Option<Student> = self
            .fetch_json(&context, self.client.get(self.endpoints.student(id)))
            .await?;
        student.ok_or_else(|| GatewayError::NotFound(format!("student {id}")))
    }

    async fn create_student(&self, form: &StudentForm) -> Result<Outcome, GatewayError> {
        let context = LogContext::for_operation(Operation::CreateStudent);
        let multipart = student_multipart(None, form).await?;
        let request = self
            .client
            .post(self.endpoints.students_add())
            .multipart(multipart);
        self.structured_mutation(Operation::CreateStudent, context, request).await
    }

    async fn update_student(
        &self,
        id: StudentId,
        form: &StudentForm,
    ) -> Result<Outcome, GatewayError> {
        let context = LogContext::for_operation(Operation::UpdateStudent).with_student(id);
        let multipart = student_multipart(Some(id), form).await?;
        let request = self
            .client
            .post(self.endpoints.students_update())
            .multipart(multipart);
        self.structured_mutation(Operation::UpdateStudent, context, request).await
    }

    async fn delete_student(&self, id: StudentId) -> Result<Outcome, GatewayError> {
        let context = LogContext::for_operation(Operation::DeleteStudent).with_student(id);
        let request = self.client.delete(self.endpoints.student(id));
        self.structured_mutation(Operation::DeleteStudent, context, request).await
    }

    async fn list_contacts(&self, student: StudentId) -> Result<Vec<Contact>, GatewayError> {
        let context = LogContext::for_operation(Operation::ListContacts).with_student(student);
        // The backend answers `null` instead of an empty list on lookup failures.
        let contacts: Option<Vec<Contact>> = self
            .fetch_json(&context, self.client.get(self.endpoints.contacts_for(student)))
            .await?;
        Ok(contacts.unwrap_or_default())
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact, GatewayError> {
        let context = LogContext::for_operation(Operation::GetContact).with_contact(id);
        let contact: Option<Contact> = self
            .fetch_json(&context, self.client.get(self.endpoints.contact(id)))
            .await?;
        contact.ok_or_else(|| GatewayError::NotFound(format!("contact {id}")))
    }

    async fn create_contact(&self, draft: &ContactDraft) -> Result<Outcome, GatewayError> {
        let context =
            LogContext::for_operation(Operation::CreateContact).with_student(draft.student_id);
        let body = ContactDraft {
            id: None,
            ..draft.clone()
        };
        let request = self.client.post(self.endpoints.contacts_add()).json(&body);
        self.literal_mutation(Operation::CreateContact, context, request).await
    }

    async fn update_contact(&self, draft: &ContactDraft) -> Result<Outcome, GatewayError> {
        let Some(id) = draft.id else {
            return Err(GatewayError::InvalidRequest("contact update requires an id"));
        };
        let context = LogContext::for_operation(Operation::UpdateContact)
            .with_student(draft.student_id)
            .with_contact(id);
        let request = self.client.put(self.endpoints.contacts_update()).json(draft);
        self.literal_mutation(Operation::UpdateContact, context, request).await
    }

    async fn delete_contact(&self, id: ContactId) -> Result<Outcome, GatewayError> {
        let context = LogContext::for_operation(Operation::DeleteContact).with_contact(id);
        let request = self.client.delete(self.endpoints.contact(id));
        self.literal_mutation(Operation::DeleteContact, context, request).await
    }
}
