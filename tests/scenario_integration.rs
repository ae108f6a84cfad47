//! ---
//! si_section: "07-test-support"
//! si_subsection: "integration-tests"
//! si_type: "source"
//! si_scope: "test"
//! si_description: "End-to-end journeys through the console against a prefixed stub deployment."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::{Duration, Instant};

use si_common::{BackendConfig, UiConfig};
use si_core::view::NO_STUDENTS;
use si_core::{Attachment, ListingView, Renderer, Severity, StudentConsole};
use si_model::{Student, StudentId};
use si_net::{HttpGateway, StudentGateway};
use si_testharness::{StubBackend, StubBackendHandle};

const PREFIX: &str = "/StudentInfo";

async fn deploy(backend: StubBackend) -> (Arc<HttpGateway>, StubBackendHandle) {
    let handle = backend.with_prefix(PREFIX).spawn().await.unwrap();
    assert!(handle.base_url().ends_with(PREFIX));
    let config = BackendConfig {
        base_url: format!("{}/", handle.base_url()),
        request_timeout: Duration::from_secs(5),
    };
    (Arc::new(HttpGateway::new(&config).unwrap()), handle)
}

fn console(gateway: &Arc<HttpGateway>, ui: &UiConfig) -> StudentConsole {
    let renderer = Renderer::new(gateway.endpoints().clone());
    StudentConsole::new(gateway.clone(), renderer, ui)
}

#[tokio::test]
async fn list_delete_list_returns_nothing() {
    let backend = StubBackend::new();
    backend.seed_student(Student::new(1, "A", "F"));
    let (gateway, handle) = deploy(backend).await;

    let before = gateway.list_students().await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id, StudentId(1));

    let outcome = gateway.delete_student(StudentId(1)).await.unwrap();
    assert!(outcome.ok);
    assert!(gateway.list_students().await.unwrap().is_empty());
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn blank_search_is_the_listing() {
    let backend = StubBackend::new();
    backend.insert_student("Asha", "Ravi");
    backend.insert_student("Bela", "Mohan");
    let (gateway, handle) = deploy(backend).await;

    assert_eq!(
        gateway.search_students("").await.unwrap(),
        gateway.list_students().await.unwrap()
    );
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn student_with_contacts_from_creation_to_cascade_delete() {
    let (gateway, handle) = deploy(StubBackend::new()).await;
    let mut console = console(&gateway, &UiConfig::default());

    console.load_students().await;
    assert_eq!(*console.students(), ListingView::Empty(NO_STUDENTS.into()));

    console.open_add_student();
    {
        let form = console.student_form_mut().unwrap();
        form.inputs.name = "Asha".into();
        form.inputs.father_name = "Ravi".into();
        form.inputs.aadhar_number = "123412341234".into();
    }
    console.save_student().await;
    assert!(!console.modal().is_open());
    let row = console.students().rows()[0].clone();
    assert_eq!(row.name, "Asha");
    assert_eq!(row.photo, Attachment::Missing("No Photo"));
    let student_id = row.id;

    console.open_contacts(student_id).await;
    console.show_add_contact_form();
    {
        let form = console.contact_form_mut().unwrap();
        form.mob_no = "9876543210".into();
        form.city = "Pune".into();
        form.address = "1 Main St".into();
    }
    console.save_contact().await;
    let session = console.contacts().unwrap();
    assert_eq!(session.listing.rows().len(), 1);
    assert_eq!(session.listing.rows()[0].city, "Pune");
    assert_eq!(handle.backend().contacts()[0].student_id, student_id);

    console.request_delete_student(student_id);
    console.resolve_confirmation(true).await;
    assert!(console.contacts().is_none());
    assert_eq!(*console.students(), ListingView::Empty(NO_STUDENTS.into()));
    assert!(handle.backend().contacts().is_empty());
    let note = console.notification().unwrap();
    assert_eq!(note.severity, Severity::Success);
    assert_eq!(note.message, "Student deleted successfully!");
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn upload_links_carry_the_deployment_prefix() {
    let backend = StubBackend::new();
    let mut student = Student::new(0, "Asha", "Ravi");
    student.profile_photo = Some("me.png".into());
    student.aadhar_path = Some("card.pdf".into());
    backend.seed_student(student);
    let (gateway, handle) = deploy(backend).await;
    let mut console = console(&gateway, &UiConfig::default());

    console.load_students().await;
    let row = &console.students().rows()[0];
    let expected = format!("{}/uploads/me.png", handle.base_url());
    assert_eq!(row.photo.url(), Some(expected.as_str()));
    assert_eq!(row.aadhar_file.label(), "View Aadhar");
    assert!(row
        .aadhar_file
        .url()
        .unwrap()
        .ends_with("/StudentInfo/uploads/card.pdf"));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn notifications_replace_each_other_and_expire() {
    let backend = StubBackend::new();
    let student = backend.insert_student("Asha", "Ravi");
    let (gateway, handle) = deploy(backend).await;
    let ui = UiConfig {
        notification_ttl: Duration::from_secs(3),
        ..UiConfig::default()
    };
    let mut console = console(&gateway, &ui);

    console.load_students().await;
    console.open_add_student();
    console.save_student().await;
    assert_eq!(
        console.notification().unwrap().message,
        "Name is required"
    );

    console.request_delete_student(student.id);
    console.resolve_confirmation(true).await;
    let note = console.notification().unwrap();
    assert_eq!(note.message, "Student deleted successfully!");
    let expires_at = note.expires_at();

    assert!(!console.tick(Instant::now()));
    assert!(console.tick(expires_at));
    assert!(console.notification().is_none());
    handle.shutdown().await.unwrap();
}
