//! ---
//! si_section: "05-interaction-core"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Modal state machines owning the open student and contact."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! The "currently open student" lives in [`ContactSession::student_id`] and
//! exists exactly while the contact view is open. The "currently open
//! contact" is [`FormMode::Edit`] inside a shown contact sub-form. Closing a
//! modal drops its state, so neither identifier can outlive its view.

use si_model::{
    Contact, ContactDraft, ContactId, Student, StudentForm, StudentId, Upload,
};

use crate::view::{ContactCard, ListingView, LOADING_CONTACTS};

pub const TITLE_ADD_STUDENT: &str = "Add Student";
pub const TITLE_EDIT_STUDENT: &str = "Edit Student";
pub const TITLE_ADD_CONTACT: &str = "Add Contact";
pub const TITLE_EDIT_CONTACT: &str = "Edit Contact";
pub const SUBMIT_IDLE: &str = "Save";
pub const SUBMIT_BUSY: &str = "Saving...";

/// Whether a form creates a record or edits the one identified by `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Add,
    Edit(Id),
}

impl<Id: Copy> FormMode<Id> {
    pub fn editing(&self) -> Option<Id> {
        match self {
            FormMode::Add => None,
            FormMode::Edit(id) => Some(*id),
        }
    }
}

fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        SUBMIT_BUSY
    } else {
        SUBMIT_IDLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentField {
    #[default]
    Name,
    FatherName,
    AadharNumber,
    ProfilePhoto,
    AadharFile,
}

impl StudentField {
    pub const ALL: [StudentField; 5] = [
        StudentField::Name,
        StudentField::FatherName,
        StudentField::AadharNumber,
        StudentField::ProfilePhoto,
        StudentField::AadharFile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::FatherName => "Father Name",
            StudentField::AadharNumber => "Aadhar Number",
            StudentField::ProfilePhoto => "Profile Photo",
            StudentField::AadharFile => "Aadhar File",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw text of the student form inputs; upload paths are typed, not chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInputs {
    pub name: String,
    pub father_name: String,
    pub aadhar_number: String,
    pub profile_photo: String,
    pub aadhar_file: String,
}

impl StudentInputs {
    /// Inputs pre-populated from a fetched record. File inputs start empty,
    /// which keeps the stored files on update.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            father_name: student.father_name.clone(),
            aadhar_number: student.aadhar_number.clone().unwrap_or_default(),
            profile_photo: String::new(),
            aadhar_file: String::new(),
        }
    }

    pub fn field(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::FatherName => &self.father_name,
            StudentField::AadharNumber => &self.aadhar_number,
            StudentField::ProfilePhoto => &self.profile_photo,
            StudentField::AadharFile => &self.aadhar_file,
        }
    }

    pub fn field_mut(&mut self, field: StudentField) -> &mut String {
        match field {
            StudentField::Name => &mut self.name,
            StudentField::FatherName => &mut self.father_name,
            StudentField::AadharNumber => &mut self.aadhar_number,
            StudentField::ProfilePhoto => &mut self.profile_photo,
            StudentField::AadharFile => &mut self.aadhar_file,
        }
    }

    pub fn to_form(&self) -> StudentForm {
        StudentForm {
            name: self.name.trim().to_owned(),
            father_name: self.father_name.trim().to_owned(),
            aadhar_number: self.aadhar_number.trim().to_owned(),
            profile_photo: Upload::from_input(&self.profile_photo),
            aadhar_file: Upload::from_input(&self.aadhar_file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFormState {
    pub mode: FormMode<StudentId>,
    pub inputs: StudentInputs,
    pub focus: StudentField,
    pub submitting: bool,
}

impl StudentFormState {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            inputs: StudentInputs::default(),
            focus: StudentField::default(),
            submitting: false,
        }
    }

    pub fn edit(student: &Student) -> Self {
        Self {
            mode: FormMode::Edit(student.id),
            inputs: StudentInputs::from_student(student),
            focus: StudentField::default(),
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => TITLE_ADD_STUDENT,
            FormMode::Edit(_) => TITLE_EDIT_STUDENT,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        submit_label(self.submitting)
    }
}

/// `Closed ⇄ Open(Add|Edit)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StudentModal {
    #[default]
    Closed,
    Open(StudentFormState),
}

impl StudentModal {
    pub fn is_open(&self) -> bool {
        matches!(self, StudentModal::Open(_))
    }

    pub fn form(&self) -> Option<&StudentFormState> {
        match self {
            StudentModal::Open(form) => Some(form),
            StudentModal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut StudentFormState> {
        match self {
            StudentModal::Open(form) => Some(form),
            StudentModal::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactField {
    #[default]
    Mobile,
    City,
    Address,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Mobile, ContactField::City, ContactField::Address];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Mobile => "Mobile Number",
            ContactField::City => "City",
            ContactField::Address => "Address",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ContactField::Mobile => ContactField::City,
            ContactField::City => ContactField::Address,
            ContactField::Address => ContactField::Mobile,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ContactField::Mobile => ContactField::Address,
            ContactField::City => ContactField::Mobile,
            ContactField::Address => ContactField::City,
        }
    }
}

/// Inline contact sub-form. `student_id` is never an input: it is taken from
/// the session when the draft is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormState {
    pub mode: FormMode<ContactId>,
    pub mob_no: String,
    pub city: String,
    pub address: String,
    pub focus: ContactField,
    pub submitting: bool,
}

impl ContactFormState {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            mob_no: String::new(),
            city: String::new(),
            address: String::new(),
            focus: ContactField::default(),
            submitting: false,
        }
    }

    pub fn edit(contact: &Contact) -> Self {
        Self {
            mode: FormMode::Edit(contact.id),
            mob_no: contact.mob_no.clone(),
            city: contact.city.clone(),
            address: contact.address.clone(),
            focus: ContactField::default(),
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => TITLE_ADD_CONTACT,
            FormMode::Edit(_) => TITLE_EDIT_CONTACT,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        submit_label(self.submitting)
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Mobile => &self.mob_no,
            ContactField::City => &self.city,
            ContactField::Address => &self.address,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Mobile => &mut self.mob_no,
            ContactField::City => &mut self.city,
            ContactField::Address => &mut self.address,
        }
    }

    pub fn to_draft(&self, student_id: StudentId) -> ContactDraft {
        ContactDraft {
            id: self.mode.editing(),
            student_id,
            mob_no: self.mob_no.trim().to_owned(),
            city: self.city.trim().to_owned(),
            address: self.address.trim().to_owned(),
        }
    }
}

/// `Hidden ⇄ Shown(Add|Edit)` inside an open contact session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContactEditor {
    #[default]
    Hidden,
    Shown(ContactFormState),
}

impl ContactEditor {
    pub fn form(&self) -> Option<&ContactFormState> {
        match self {
            ContactEditor::Shown(form) => Some(form),
            ContactEditor::Hidden => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ContactFormState> {
        match self {
            ContactEditor::Shown(form) => Some(form),
            ContactEditor::Hidden => None,
        }
    }

    /// The currently open contact; present only while an edit form is shown.
    pub fn open_contact(&self) -> Option<ContactId> {
        self.form().and_then(|form| form.mode.editing())
    }
}

/// Open contact modal for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSession {
    pub student_id: StudentId,
    pub listing: ListingView<ContactCard>,
    pub editor: ContactEditor,
    pub selected: usize,
}

impl ContactSession {
    pub fn open(student_id: StudentId) -> Self {
        Self {
            student_id,
            listing: ListingView::Loading(LOADING_CONTACTS),
            editor: ContactEditor::Hidden,
            selected: 0,
        }
    }

    pub fn selected_contact(&self) -> Option<ContactId> {
        self.listing.rows().get(self.selected).map(|card| card.id)
    }
}

/// Destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmation {
    DeleteStudent(StudentId),
    DeleteContact(ContactId),
}

impl PendingConfirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingConfirmation::DeleteStudent(_) => {
                "Are you sure you want to delete this student and all associated contacts?"
            }
            PendingConfirmation::DeleteContact(_) => "Are you sure you want to delete this contact?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_focus_wraps_around() {
        assert_eq!(StudentField::AadharFile.next(), StudentField::Name);
        assert_eq!(StudentField::Name.previous(), StudentField::AadharFile);
        assert_eq!(ContactField::Address.next(), ContactField::Mobile);
    }

    #[test]
    fn edit_form_is_prepopulated_without_file_inputs() {
        let mut student = Student::new(7, "Asha", "Ravi");
        student.aadhar_number = Some("123456789012".into());
        student.profile_photo = Some("p.png".into());
        let state = StudentFormState::edit(&student);
        assert_eq!(state.title(), TITLE_EDIT_STUDENT);
        assert_eq!(state.mode, FormMode::Edit(StudentId(7)));
        assert_eq!(state.inputs.aadhar_number, "123456789012");
        let form = state.inputs.to_form();
        assert!(form.profile_photo.is_none());
    }

    #[test]
    fn contact_draft_keeps_session_student() {
        let contact = Contact {
            id: ContactId(3),
            student_id: StudentId(9),
            mob_no: "9876543210".into(),
            city: "Pune".into(),
            address: "1 Main St".into(),
        };
        let form = ContactFormState::edit(&contact);
        let draft = form.to_draft(StudentId(9));
        assert_eq!(draft.id, Some(ContactId(3)));
        assert_eq!(draft.student_id, StudentId(9));
        assert_eq!(draft.mob_no, "9876543210");
    }

    #[test]
    fn open_contact_exists_only_in_edit_mode() {
        let mut editor = ContactEditor::Shown(ContactFormState::add());
        assert_eq!(editor.open_contact(), None);
        editor = ContactEditor::Shown(ContactFormState {
            mode: FormMode::Edit(ContactId(4)),
            ..ContactFormState::add()
        });
        assert_eq!(editor.open_contact(), Some(ContactId(4)));
    }

    #[test]
    fn submit_label_tracks_busy_flag() {
        let mut form = StudentFormState::add();
        assert_eq!(form.submit_label(), SUBMIT_IDLE);
        form.submitting = true;
        assert_eq!(form.submit_label(), SUBMIT_BUSY);
    }
}
