//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "tests"
//! si_type: "source"
//! si_scope: "test"
//! si_description: "HTTP gateway behaviour against the stub backend."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::io::Write;
use std::time::Duration;

use si_common::BackendConfig;
use si_model::{ContactDraft, ContactId, Operation, StudentForm, StudentId, Upload};
use si_net::{GatewayError, HttpGateway, StudentGateway};
use si_testharness::{Fault, StubBackend, StubBackendHandle};

fn gateway_for(handle: &StubBackendHandle) -> HttpGateway {
    let config = BackendConfig {
        base_url: handle.base_url().to_owned(),
        request_timeout: Duration::from_secs(5),
    };
    HttpGateway::new(&config).unwrap()
}

fn form(name: &str, aadhar: &str) -> StudentForm {
    StudentForm {
        name: name.into(),
        father_name: "F".into(),
        aadhar_number: aadhar.into(),
        ..StudentForm::default()
    }
}

#[tokio::test]
async fn blank_search_is_a_plain_listing() {
    let backend = StubBackend::new();
    backend.insert_student("Asha", "F");
    backend.insert_student("Ravi", "G");
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let listed = gateway.list_students().await.unwrap();
    let searched = gateway.search_students("   ").await.unwrap();
    assert_eq!(listed, searched);
    assert_eq!(handle.backend().request_count(Operation::SearchStudents), 0);
    assert_eq!(handle.backend().request_count(Operation::ListStudents), 2);

    let hits = gateway.search_students("as h").await.unwrap();
    assert!(hits.is_empty());
    let hits = gateway.search_students("asha").await.unwrap();
    assert_eq!(hits.len(), 1);
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn create_sends_uploads_as_named_parts() {
    let handle = StubBackend::new().spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let mut photo = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    photo.write_all(b"\x89PNG").unwrap();
    let mut student = form("Asha", "123456789012");
    student.profile_photo = Some(Upload::new(photo.path()));

    let outcome = gateway.create_student(&student).await.unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.message, "Student added successfully!");

    let stored = &handle.backend().students()[0];
    assert_eq!(stored.aadhar_number.as_deref(), Some("123456789012"));
    let photo_name = stored.profile_photo.clone().unwrap();
    assert!(photo_name.ends_with(".png"));
    assert_eq!(handle.backend().upload(&photo_name), Some(b"\x89PNG".to_vec()));
    assert_eq!(stored.aadhar_path, None);
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreadable_upload_fails_before_any_request() {
    let handle = StubBackend::new().spawn().await.unwrap();
    let gateway = gateway_for(&handle);
    let dir = tempfile::tempdir().unwrap();

    let mut student = form("Asha", "");
    student.aadhar_file = Some(Upload::new(dir.path().join("missing.pdf")));
    let err = gateway.create_student(&student).await.unwrap_err();
    assert!(matches!(err, GatewayError::Upload { .. }));
    assert_eq!(handle.backend().total_requests(), 0);
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn duplicate_aadhar_keeps_server_message() {
    let backend = StubBackend::new();
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    gateway
        .create_student(&form("Asha", "123456789012"))
        .await
        .unwrap();
    let err = gateway
        .create_student(&form("Ravi", "123456789012"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), Some("Aadhar number already exists!"));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_mutation_with_2xx_is_a_failed_outcome() {
    let backend = StubBackend::new();
    let student = backend.insert_student("Asha", "F");
    backend.inject_fault(Operation::UpdateStudent, Fault::Reject(String::new()));
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let outcome = gateway
        .update_student(student.id, &form("Asha K", ""))
        .await
        .unwrap();
    assert!(!outcome.ok);
    assert_eq!(outcome.message, "Error saving student!");
    assert_eq!(handle.backend().students()[0].name, "Asha");
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let backend = StubBackend::new();
    let student = backend.insert_student("Asha", "F");
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let fetched = gateway.get_student(student.id).await.unwrap();
    let mut edit = StudentForm::from_student(&fetched);
    edit.name = "Asha K".into();
    let outcome = gateway.update_student(student.id, &edit).await.unwrap();
    assert!(outcome.ok);
    assert_eq!(gateway.get_student(student.id).await.unwrap().name, "Asha K");

    let outcome = gateway.delete_student(student.id).await.unwrap();
    assert_eq!(outcome.message, "Student deleted successfully!");
    assert!(gateway.list_students().await.unwrap().is_empty());

    let err = gateway.get_student(student.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn contact_literals_are_normalised() {
    let backend = StubBackend::new();
    let student = backend.insert_student("Asha", "F");
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let mut draft = ContactDraft::new(student.id);
    draft.mob_no = "9876543210".into();
    draft.city = "Pune".into();
    draft.address = "1 Main St".into();
    let outcome = gateway.create_contact(&draft).await.unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.message, "Contact saved successfully!");

    let contacts = gateway.list_contacts(student.id).await.unwrap();
    assert_eq!(contacts.len(), 1);
    let contact = gateway.get_contact(contacts[0].id).await.unwrap();
    assert_eq!(contact.student_id, student.id);

    let mut edit = ContactDraft::from_contact(&contact);
    edit.city = "Mumbai".into();
    assert!(gateway.update_contact(&edit).await.unwrap().ok);
    assert_eq!(handle.backend().contacts()[0].city, "Mumbai");
    assert_eq!(handle.backend().contacts()[0].student_id, student.id);

    let outcome = gateway.delete_contact(ContactId(999)).await.unwrap();
    assert!(!outcome.ok);
    assert_eq!(outcome.message, "Error deleting contact!");

    let err = gateway.get_contact(ContactId(999)).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn contact_update_without_id_is_rejected_locally() {
    let handle = StubBackend::new().spawn().await.unwrap();
    let gateway = gateway_for(&handle);
    let err = gateway
        .update_contact(&ContactDraft::new(StudentId(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidRequest(_)));
    assert_eq!(handle.backend().total_requests(), 0);
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn status_and_malformed_faults_map_to_errors() {
    let backend = StubBackend::new();
    backend.inject_fault(Operation::ListStudents, Fault::Status(500));
    backend.inject_fault(Operation::ListContacts, Fault::Malformed);
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);

    let err = gateway.list_students().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail(), None);

    let err = gateway.list_contacts(StudentId(1)).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let handle = StubBackend::new().spawn().await.unwrap();
    let config = BackendConfig {
        base_url: handle.base_url().to_owned(),
        request_timeout: Duration::from_secs(2),
    };
    handle.shutdown().await.unwrap();

    let gateway = HttpGateway::new(&config).unwrap();
    let err = gateway.list_students().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn deployment_prefix_is_honoured() {
    let backend = StubBackend::new().with_prefix("/StudentInfo");
    backend.insert_student("Asha", "F");
    let handle = backend.spawn().await.unwrap();
    let gateway = gateway_for(&handle);
    assert_eq!(gateway.list_students().await.unwrap().len(), 1);
    assert!(gateway
        .endpoints()
        .upload("x.png")
        .ends_with("/StudentInfo/uploads/x.png"));
    handle.shutdown().await.unwrap();
}
