//! ---
//! si_section: "07-test-support"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "axum handlers for the stub REST surface."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use si_model::{
    fields, ContactDraft, MutationReply, Operation, LITERAL_ERROR, LITERAL_SUCCESS,
};
use tracing::warn;

use crate::store::{
    StudentSubmission, UploadedFile, MSG_STUDENT_ADDED, MSG_STUDENT_DELETED, MSG_STUDENT_UPDATED,
};
use crate::{Fault, StubState};

type Shared = State<Arc<StubState>>;

pub(crate) fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/students/list", get(list_students))
        .route("/students/search", get(search_students))
        .route("/students/add", post(add_student))
        .route("/students/update", post(update_student))
        .route("/students/:id", get(get_student).delete(delete_student))
        .route("/contacts/student/:student_id", get(list_contacts))
        .route("/contacts/add", post(add_contact))
        .route("/contacts/update", put(update_contact))
        .route("/contacts/:id", get(get_contact).delete(delete_contact))
        .route("/uploads/:name", get(get_upload))
        .with_state(state)
}

/// Response for an injected fault, shaped like the real backend's reply for `operation`.
fn fault_response(operation: Operation, fault: Fault) -> Response {
    match fault {
        Fault::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "stub backend fault").into_response()
        }
        Fault::Reject(message) => match operation {
            Operation::CreateStudent | Operation::UpdateStudent | Operation::DeleteStudent => {
                Json(MutationReply::failed(message)).into_response()
            }
            Operation::CreateContact | Operation::UpdateContact | Operation::DeleteContact => {
                LITERAL_ERROR.into_response()
            }
            _ => Json(serde_json::Value::Null).into_response(),
        },
        Fault::Malformed => (
            [(header::CONTENT_TYPE, "application/json")],
            "{\"unexpected\":",
        )
            .into_response(),
    }
}

macro_rules! intercept {
    ($state:expr, $operation:expr, $method:literal, $path:expr) => {
        if let Some(fault) = $state.record($operation, $method, $path) {
            return fault_response($operation, fault);
        }
    };
}

fn rejected(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(MutationReply::failed(message))).into_response()
}

fn literal(ok: bool) -> Response {
    let body = if ok { LITERAL_SUCCESS } else { LITERAL_ERROR };
    body.into_response()
}

async fn list_students(State(state): Shared) -> Response {
    intercept!(state, Operation::ListStudents, "GET", "/students/list".to_owned());
    Json(state.records.lock().students()).into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    keyword: String,
}

async fn search_students(State(state): Shared, Query(params): Query<SearchParams>) -> Response {
    intercept!(
        state,
        Operation::SearchStudents,
        "GET",
        format!("/students/search?keyword={}", params.keyword)
    );
    Json(state.records.lock().search(&params.keyword)).into_response()
}

async fn get_student(State(state): Shared, Path(id): Path<i64>) -> Response {
    intercept!(state, Operation::GetStudent, "GET", format!("/students/{id}"));
    match state.records.lock().student(id) {
        Some(student) => Json(student).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<StudentSubmission, Response> {
    let bad_request = |err: axum::extract::multipart::MultipartError| {
        warn!(error = %err, "malformed multipart submission");
        (StatusCode::BAD_REQUEST, err.body_text()).into_response()
    };
    let mut submission = StudentSubmission::default();
    let mut name = None;
    let mut father_name = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let field_name = field.name().unwrap_or_default().to_owned();
        let original_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await.map_err(bad_request)?;
        let text = || String::from_utf8_lossy(&bytes).trim().to_owned();
        match field_name.as_str() {
            fields::ID => submission.id = text().parse().ok(),
            fields::NAME => name = Some(text()),
            fields::FATHER_NAME => father_name = Some(text()),
            fields::AADHAR_NUMBER => submission.aadhar_number = Some(text()).filter(|v| !v.is_empty()),
            fields::PROFILE_PHOTO_FILE | fields::AADHAR_FILE => {
                // Browsers send an empty part when no file was chosen.
                let Some(original_name) = original_name.filter(|n| !n.is_empty()) else {
                    continue;
                };
                let file = UploadedFile {
                    original_name,
                    bytes: bytes.to_vec(),
                };
                if field_name == fields::PROFILE_PHOTO_FILE {
                    submission.profile_photo = Some(file);
                } else {
                    submission.aadhar_file = Some(file);
                }
            }
            _ => {}
        }
    }
    match (name, father_name) {
        (Some(name), Some(father_name)) => {
            submission.name = name;
            submission.father_name = father_name;
            Ok(submission)
        }
        _ => Err((StatusCode::BAD_REQUEST, "missing required field").into_response()),
    }
}

async fn add_student(State(state): Shared, multipart: Multipart) -> Response {
    intercept!(state, Operation::CreateStudent, "POST", "/students/add".to_owned());
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(response) => return response,
    };
    match state.records.lock().create_student(submission) {
        Ok(student) => Json(MutationReply {
            student_id: Some(student.id),
            ..MutationReply::ok(MSG_STUDENT_ADDED)
        })
        .into_response(),
        Err(rejection) => rejected(rejection.0),
    }
}

async fn update_student(State(state): Shared, multipart: Multipart) -> Response {
    intercept!(state, Operation::UpdateStudent, "POST", "/students/update".to_owned());
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(response) => return response,
    };
    match state.records.lock().update_student(submission) {
        Ok(_) => Json(MutationReply::ok(MSG_STUDENT_UPDATED)).into_response(),
        Err(rejection) => rejected(rejection.0),
    }
}

async fn delete_student(State(state): Shared, Path(id): Path<i64>) -> Response {
    intercept!(state, Operation::DeleteStudent, "DELETE", format!("/students/{id}"));
    match state.records.lock().delete_student(id) {
        Ok(()) => Json(MutationReply::ok(MSG_STUDENT_DELETED)).into_response(),
        Err(rejection) => rejected(rejection.0),
    }
}

async fn list_contacts(State(state): Shared, Path(student_id): Path<i64>) -> Response {
    intercept!(
        state,
        Operation::ListContacts,
        "GET",
        format!("/contacts/student/{student_id}")
    );
    Json(state.records.lock().contacts_of(student_id)).into_response()
}

async fn get_contact(State(state): Shared, Path(id): Path<i64>) -> Response {
    intercept!(state, Operation::GetContact, "GET", format!("/contacts/{id}"));
    // Missing contacts come back as a JSON `null`, not a 404.
    Json(state.records.lock().contact(id)).into_response()
}

async fn add_contact(State(state): Shared, Json(draft): Json<ContactDraft>) -> Response {
    intercept!(state, Operation::CreateContact, "POST", "/contacts/add".to_owned());
    literal(state.records.lock().create_contact(draft).is_some())
}

async fn update_contact(State(state): Shared, Json(draft): Json<ContactDraft>) -> Response {
    intercept!(state, Operation::UpdateContact, "PUT", "/contacts/update".to_owned());
    literal(state.records.lock().update_contact(draft).is_some())
}

async fn delete_contact(State(state): Shared, Path(id): Path<i64>) -> Response {
    intercept!(state, Operation::DeleteContact, "DELETE", format!("/contacts/{id}"));
    literal(state.records.lock().delete_contact(id))
}

async fn get_upload(State(state): Shared, Path(name): Path<String>) -> Response {
    match state.records.lock().upload(&name) {
        Some(bytes) => bytes.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
