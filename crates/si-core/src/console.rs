//! ---
//! si_section: "05-interaction-core"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Console controller sequencing request, render, notify and refresh."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! [`StudentConsole`] owns every piece of interaction state and is driven from
//! a single event loop, so it needs no locking. Each action follows the same
//! order: gateway call, state update, view refresh, notification.
//!
//! Saves are split into `begin_*` and `finish_*` so a front end can draw the
//! busy submit control between the two. While a save is in flight its
//! [`SubmissionKey`] stays registered and a second submission is ignored.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use si_common::UiConfig;
use si_logging::{si_debug, si_info, LogContext};
use si_model::{ContactDraft, ContactId, Operation, Outcome, StudentForm, StudentId};
use si_net::{GatewayError, StudentGateway};

use crate::notify::{Notification, NotificationSurface};
use crate::session::{
    ContactEditor, ContactFormState, ContactSession, PendingConfirmation, StudentFormState,
    StudentModal,
};
use crate::view::{
    contact_listing, contacts_failed, students_failed, ListingView, Renderer, StudentRow,
    LOADING_STUDENTS, SEARCHING,
};

/// Entity being mutated; at most one submission per key is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKey {
    /// Student form; `None` while adding.
    StudentForm(Option<StudentId>),
    /// Contact sub-form of a student; `None` while adding.
    ContactForm(StudentId, Option<ContactId>),
    DeleteStudent(StudentId),
    DeleteContact(ContactId),
}

/// A validated student submission whose control is marked busy.
#[derive(Debug, Clone)]
pub struct StudentSave {
    key: SubmissionKey,
    id: Option<StudentId>,
    form: StudentForm,
}

/// A validated contact submission whose control is marked busy.
#[derive(Debug, Clone)]
pub struct ContactSave {
    key: SubmissionKey,
    draft: ContactDraft,
}

/// Message for a failed call: the server's own text when it sent one.
pub fn failure_message(operation: Operation, err: &GatewayError) -> String {
    err.detail()
        .map(str::to_owned)
        .unwrap_or_else(|| operation.failure_text().to_owned())
}

pub struct StudentConsole {
    gateway: Arc<dyn StudentGateway>,
    renderer: Renderer,
    notifications: NotificationSurface,
    students: ListingView<StudentRow>,
    search_input: String,
    active_keyword: Option<String>,
    selected: usize,
    modal: StudentModal,
    contacts: Option<ContactSession>,
    confirmation: Option<PendingConfirmation>,
    in_flight: HashSet<SubmissionKey>,
}

impl StudentConsole {
    pub fn new(gateway: Arc<dyn StudentGateway>, renderer: Renderer, ui: &UiConfig) -> Self {
        Self {
            gateway,
            renderer,
            notifications: NotificationSurface::new(ui.notification_ttl),
            students: ListingView::Loading(LOADING_STUDENTS),
            search_input: String::new(),
            active_keyword: None,
            selected: 0,
            modal: StudentModal::Closed,
            contacts: None,
            confirmation: None,
            in_flight: HashSet::new(),
        }
    }

    // ----- read access for front ends -----

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn students(&self) -> &ListingView<StudentRow> {
        &self.students
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_input_mut(&mut self) -> &mut String {
        &mut self.search_input
    }

    /// Keyword of the search currently shown, if the table is filtered.
    pub fn active_keyword(&self) -> Option<&str> {
        self.active_keyword.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_student(&self) -> Option<StudentId> {
        self.students.rows().get(self.selected).map(|row| row.id)
    }

    pub fn select_next(&mut self) {
        let len = self.students.rows().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn modal(&self) -> &StudentModal {
        &self.modal
    }

    pub fn student_form_mut(&mut self) -> Option<&mut StudentFormState> {
        self.modal.form_mut()
    }

    pub fn contacts(&self) -> Option<&ContactSession> {
        self.contacts.as_ref()
    }

    pub fn contact_form_mut(&mut self) -> Option<&mut ContactFormState> {
        self.contacts
            .as_mut()
            .and_then(|session| session.editor.form_mut())
    }

    pub fn select_next_contact(&mut self) {
        if let Some(session) = self.contacts.as_mut() {
            let len = session.listing.rows().len();
            if len > 0 {
                session.selected = (session.selected + 1).min(len - 1);
            }
        }
    }

    pub fn select_previous_contact(&mut self) {
        if let Some(session) = self.contacts.as_mut() {
            session.selected = session.selected.saturating_sub(1);
        }
    }

    pub fn confirmation(&self) -> Option<&PendingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn is_in_flight(&self, key: SubmissionKey) -> bool {
        self.in_flight.contains(&key)
    }

    // ----- notifications -----

    fn notify_outcome(&mut self, outcome: &Outcome) {
        self.notifications.show_outcome(outcome, Instant::now());
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.error(message, Instant::now());
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    /// Expire the notification if its delay has passed. Returns true when the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifications.expire(now)
    }

    // ----- student listing -----

    /// Full listing; clears any active search filter.
    pub async fn load_students(&mut self) {
        self.active_keyword = None;
        self.students = ListingView::Loading(LOADING_STUDENTS);
        match self.gateway.list_students().await {
            Ok(students) => {
                si_debug!(
                    context = LogContext::for_operation(Operation::ListStudents),
                    "loaded {} students",
                    students.len()
                );
                self.students = self.renderer.student_listing(&students, None);
                self.clamp_selection();
            }
            Err(err) => {
                self.students = students_failed(&err.to_string());
                self.notify_error(failure_message(Operation::ListStudents, &err));
            }
        }
    }

    /// Search with the current input; a blank input is a full listing.
    pub async fn search(&mut self) {
        let keyword = self.search_input.trim().to_owned();
        if keyword.is_empty() {
            self.load_students().await;
        } else {
            self.run_search(keyword).await;
        }
    }

    async fn run_search(&mut self, keyword: String) {
        self.students = ListingView::Loading(SEARCHING);
        match self.gateway.search_students(&keyword).await {
            Ok(students) => {
                self.students = self.renderer.student_listing(&students, Some(&keyword));
                self.clamp_selection();
            }
            Err(err) => {
                self.students = students_failed(&err.to_string());
                self.notify_error(failure_message(Operation::SearchStudents, &err));
            }
        }
        self.active_keyword = Some(keyword);
    }

    pub async fn clear_search(&mut self) {
        self.search_input.clear();
        self.load_students().await;
    }

    /// Re-run whatever the table currently shows.
    pub async fn reload(&mut self) {
        match self.active_keyword.clone() {
            Some(keyword) => self.run_search(keyword).await,
            None => self.load_students().await,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.students.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // ----- student modal -----

    pub fn open_add_student(&mut self) {
        self.modal = StudentModal::Open(StudentFormState::add());
    }

    /// Fetch the record first; the modal opens only once the form is populated.
    pub async fn open_edit_student(&mut self, id: StudentId) {
        self.modal = StudentModal::Closed;
        match self.gateway.get_student(id).await {
            Ok(student) => self.modal = StudentModal::Open(StudentFormState::edit(&student)),
            Err(err) => self.notify_error(failure_message(Operation::GetStudent, &err)),
        }
    }

    pub fn close_student_modal(&mut self) {
        self.modal = StudentModal::Closed;
    }

    /// Validate the open form and mark it busy. `None` when nothing should be sent.
    pub fn begin_student_save(&mut self) -> Option<StudentSave> {
        let state = self.modal.form()?;
        if state.submitting {
            return None;
        }
        let id = state.mode.editing();
        let form = state.inputs.to_form();
        if let Some(violation) = form.hint_violations().first() {
            self.notify_error(violation.message);
            return None;
        }
        let key = SubmissionKey::StudentForm(id);
        if !self.in_flight.insert(key) {
            return None;
        }
        if let Some(state) = self.modal.form_mut() {
            state.submitting = true;
        }
        Some(StudentSave { key, id, form })
    }

    pub async fn finish_student_save(&mut self, save: StudentSave) {
        let (operation, result) = match save.id {
            Some(id) => (
                Operation::UpdateStudent,
                self.gateway.update_student(id, &save.form).await,
            ),
            None => (
                Operation::CreateStudent,
                self.gateway.create_student(&save.form).await,
            ),
        };
        self.in_flight.remove(&save.key);
        if let Some(state) = self.modal.form_mut() {
            state.submitting = false;
        }
        match result {
            Ok(outcome) if outcome.ok => {
                self.modal = StudentModal::Closed;
                self.load_students().await;
                self.notify_outcome(&outcome);
            }
            Ok(outcome) => self.notify_outcome(&outcome),
            Err(err) => self.notify_error(failure_message(operation, &err)),
        }
    }

    pub async fn save_student(&mut self) {
        if let Some(save) = self.begin_student_save() {
            self.finish_student_save(save).await;
        }
    }

    // ----- confirmation -----

    pub fn request_delete_student(&mut self, id: StudentId) {
        self.confirmation = Some(PendingConfirmation::DeleteStudent(id));
    }

    pub fn request_delete_contact(&mut self, id: ContactId) {
        if self.contacts.is_some() {
            self.confirmation = Some(PendingConfirmation::DeleteContact(id));
        }
    }

    /// Answer the pending prompt. Declining issues no call and no notification.
    pub async fn resolve_confirmation(&mut self, confirmed: bool) {
        let Some(pending) = self.confirmation.take() else {
            return;
        };
        if !confirmed {
            si_debug!("delete declined");
            return;
        }
        match pending {
            PendingConfirmation::DeleteStudent(id) => self.delete_student(id).await,
            PendingConfirmation::DeleteContact(id) => self.delete_contact(id).await,
        }
    }

    async fn delete_student(&mut self, id: StudentId) {
        let key = SubmissionKey::DeleteStudent(id);
        if !self.in_flight.insert(key) {
            return;
        }
        let result = self.gateway.delete_student(id).await;
        self.in_flight.remove(&key);
        match result {
            Ok(outcome) if outcome.ok => {
                si_info!(
                    context = LogContext::for_operation(Operation::DeleteStudent).with_student(id),
                    "student deleted"
                );
                if self.contacts.as_ref().map(|s| s.student_id) == Some(id) {
                    self.contacts = None;
                }
                self.load_students().await;
                self.notify_outcome(&outcome);
            }
            Ok(outcome) => self.notify_outcome(&outcome),
            Err(err) => self.notify_error(failure_message(Operation::DeleteStudent, &err)),
        }
    }

    // ----- contact session -----

    pub async fn open_contacts(&mut self, student_id: StudentId) {
        self.contacts = Some(ContactSession::open(student_id));
        self.load_contacts().await;
    }

    pub fn close_contacts(&mut self) {
        self.contacts = None;
    }

    /// Reload the open session's list. A successful load hides the sub-form.
    pub async fn load_contacts(&mut self) {
        let Some(student_id) = self.contacts.as_ref().map(|s| s.student_id) else {
            return;
        };
        let result = self.gateway.list_contacts(student_id).await;
        let failure = match (self.contacts.as_mut(), result) {
            (Some(session), Ok(contacts)) => {
                session.listing = contact_listing(&contacts);
                session.editor = ContactEditor::Hidden;
                session.selected = session
                    .selected
                    .min(session.listing.rows().len().saturating_sub(1));
                None
            }
            (Some(session), Err(err)) => {
                session.listing = contacts_failed(&err.to_string());
                Some(failure_message(Operation::ListContacts, &err))
            }
            (None, _) => None,
        };
        if let Some(message) = failure {
            self.notify_error(message);
        }
    }

    pub fn show_add_contact_form(&mut self) {
        if let Some(session) = self.contacts.as_mut() {
            session.editor = ContactEditor::Shown(ContactFormState::add());
        }
    }

    /// Fetch the contact first, then show it in the edit sub-form.
    pub async fn edit_contact(&mut self, id: ContactId) {
        let Some(student_id) = self.contacts.as_ref().map(|s| s.student_id) else {
            return;
        };
        let result = self.gateway.get_contact(id).await;
        match result {
            Ok(contact) if contact.student_id == student_id => {
                if let Some(session) = self.contacts.as_mut() {
                    session.editor = ContactEditor::Shown(ContactFormState::edit(&contact));
                }
            }
            Ok(_) => self.notify_error(Operation::GetContact.failure_text()),
            Err(err) => self.notify_error(failure_message(Operation::GetContact, &err)),
        }
    }

    pub async fn cancel_contact_form(&mut self) {
        if let Some(session) = self.contacts.as_mut() {
            session.editor = ContactEditor::Hidden;
        }
        self.load_contacts().await;
    }

    pub fn begin_contact_save(&mut self) -> Option<ContactSave> {
        let session = self.contacts.as_ref()?;
        let state = session.editor.form()?;
        if state.submitting {
            return None;
        }
        let draft = state.to_draft(session.student_id);
        if let Some(violation) = draft.hint_violations().first() {
            self.notify_error(violation.message);
            return None;
        }
        let key = SubmissionKey::ContactForm(draft.student_id, draft.id);
        if !self.in_flight.insert(key) {
            return None;
        }
        if let Some(state) = self.contact_form_mut() {
            state.submitting = true;
        }
        Some(ContactSave { key, draft })
    }

    pub async fn finish_contact_save(&mut self, save: ContactSave) {
        let (operation, result) = if save.draft.is_update() {
            (
                Operation::UpdateContact,
                self.gateway.update_contact(&save.draft).await,
            )
        } else {
            (
                Operation::CreateContact,
                self.gateway.create_contact(&save.draft).await,
            )
        };
        self.in_flight.remove(&save.key);
        if let Some(state) = self.contact_form_mut() {
            state.submitting = false;
        }
        match result {
            Ok(outcome) if outcome.ok => {
                if let Some(session) = self.contacts.as_mut() {
                    session.editor = ContactEditor::Hidden;
                }
                self.load_contacts().await;
                self.notify_outcome(&outcome);
            }
            Ok(outcome) => self.notify_outcome(&outcome),
            Err(err) => self.notify_error(failure_message(operation, &err)),
        }
    }

    pub async fn save_contact(&mut self) {
        if let Some(save) = self.begin_contact_save() {
            self.finish_contact_save(save).await;
        }
    }

    async fn delete_contact(&mut self, id: ContactId) {
        if self.contacts.is_none() {
            return;
        }
        let key = SubmissionKey::DeleteContact(id);
        if !self.in_flight.insert(key) {
            return;
        }
        let result = self.gateway.delete_contact(id).await;
        self.in_flight.remove(&key);
        match result {
            Ok(outcome) if outcome.ok => {
                self.load_contacts().await;
                self.notify_outcome(&outcome);
            }
            Ok(outcome) => self.notify_outcome(&outcome),
            Err(err) => self.notify_error(failure_message(Operation::DeleteContact, &err)),
        }
    }
}
