//! ---
//! si_section: "07-test-support"
//! si_subsection: "tests"
//! si_type: "source"
//! si_scope: "test"
//! si_description: "Wire-level checks of the stub backend responses."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use si_model::{Operation, StudentId};
use si_testharness::{Fault, StubBackend};

#[tokio::test]
async fn contact_mutations_answer_with_literals() {
    let backend = StubBackend::new();
    let student = backend.insert_student("A", "F");
    let handle = backend.spawn().await.unwrap();
    let client = reqwest::Client::new();

    let body = client
        .post(format!("{}/contacts/add", handle.base_url()))
        .json(&serde_json::json!({
            "id": null,
            "studentId": student.id,
            "mobNo": "9876543210",
            "city": "Pune",
            "address": "1 Main St"
        }))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "success");

    let body = client
        .delete(format!("{}/contacts/999", handle.base_url()))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "error");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_student_delete_is_a_structured_400() {
    let handle = StubBackend::new().spawn().await.unwrap();
    let response = reqwest::Client::new()
        .delete(format!("{}/students/42", handle.base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Student not found!");
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn prefix_is_part_of_every_route() {
    let backend = StubBackend::new().with_prefix("StudentInfo/");
    backend.insert_student("A", "F");
    let handle = backend.spawn().await.unwrap();
    assert!(handle.base_url().ends_with("/StudentInfo"));

    let students: serde_json::Value = reqwest::get(format!("{}/students/list", handle.base_url()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(students.as_array().map(Vec::len), Some(1));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn injected_status_fault_is_logged_and_returned() {
    let backend = StubBackend::new();
    backend.inject_fault(Operation::ListContacts, Fault::Status(503));
    let handle = backend.spawn().await.unwrap();

    let response = reqwest::get(format!(
        "{}/contacts/student/{}",
        handle.base_url(),
        StudentId(1)
    ))
    .await
    .unwrap();
    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(handle.backend().request_count(Operation::ListContacts), 1);

    handle.backend().clear_faults();
    let response = reqwest::get(format!("{}/contacts/student/1", handle.base_url()))
        .await
        .unwrap();
    assert!(response.status().is_success());
    handle.shutdown().await.unwrap();
}
