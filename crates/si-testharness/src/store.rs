//! ---
//! si_section: "07-test-support"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "In-memory record store mirroring backend persistence rules."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::collections::{BTreeMap, HashMap};

use si_model::{Contact, ContactDraft, ContactId, Student, StudentId};

pub(crate) const MSG_STUDENT_ADDED: &str = "Student added successfully!";
pub(crate) const MSG_STUDENT_UPDATED: &str = "Student updated successfully!";
pub(crate) const MSG_STUDENT_DELETED: &str = "Student deleted successfully!";
pub(crate) const MSG_STUDENT_MISSING: &str = "Student not found!";
pub(crate) const MSG_DUPLICATE_AADHAR: &str = "Aadhar number already exists!";

/// Rejection raised by a student mutation; maps to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejected(pub &'static str);

/// Student fields decoded from a multipart submission.
#[derive(Debug, Default, Clone)]
pub(crate) struct StudentSubmission {
    pub id: Option<i64>,
    pub name: String,
    pub father_name: String,
    pub aadhar_number: Option<String>,
    pub profile_photo: Option<UploadedFile>,
    pub aadhar_file: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub(crate) struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub(crate) struct Records {
    students: BTreeMap<i64, Student>,
    contacts: BTreeMap<i64, Contact>,
    uploads: HashMap<String, Vec<u8>>,
    next_student: i64,
    next_contact: i64,
    next_upload: u64,
}

impl Records {
    pub fn students(&self) -> Vec<Student> {
        self.students.values().rev().cloned().collect()
    }

    /// Case-insensitive substring match on name, father name and Aadhar number.
    pub fn search(&self, keyword: &str) -> Vec<Student> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return self.students();
        }
        let matches = |value: &str| value.to_lowercase().contains(&needle);
        self.students
            .values()
            .rev()
            .filter(|s| {
                matches(&s.name)
                    || matches(&s.father_name)
                    || s.aadhar_number.as_deref().is_some_and(matches)
            })
            .cloned()
            .collect()
    }

    pub fn student(&self, id: i64) -> Option<Student> {
        self.students.get(&id).cloned()
    }

    pub fn seed_student(&mut self, mut student: Student) -> Student {
        if student.id.0 <= 0 {
            self.next_student += 1;
            student.id = StudentId(self.next_student);
        }
        self.next_student = self.next_student.max(student.id.0);
        self.students.insert(student.id.0, student.clone());
        student
    }

    fn aadhar_taken(&self, aadhar: Option<&str>, except: Option<i64>) -> bool {
        let Some(aadhar) = aadhar else { return false };
        self.students
            .values()
            .any(|s| Some(s.id.0) != except && s.aadhar_number.as_deref() == Some(aadhar))
    }

    pub fn create_student(&mut self, submission: StudentSubmission) -> Result<Student, Rejected> {
        if self.aadhar_taken(submission.aadhar_number.as_deref(), None) {
            return Err(Rejected(MSG_DUPLICATE_AADHAR));
        }
        self.next_student += 1;
        let mut student = Student::new(
            self.next_student,
            submission.name,
            submission.father_name,
        );
        student.aadhar_number = submission.aadhar_number;
        student.profile_photo = submission.profile_photo.map(|file| self.store_upload(file));
        student.aadhar_path = submission.aadhar_file.map(|file| self.store_upload(file));
        self.students.insert(student.id.0, student.clone());
        Ok(student)
    }

    /// Replace the text fields; stored files are kept unless a new one was sent.
    pub fn update_student(&mut self, submission: StudentSubmission) -> Result<Student, Rejected> {
        let id = submission.id.ok_or(Rejected(MSG_STUDENT_MISSING))?;
        if !self.students.contains_key(&id) {
            return Err(Rejected(MSG_STUDENT_MISSING));
        }
        if self.aadhar_taken(submission.aadhar_number.as_deref(), Some(id)) {
            return Err(Rejected(MSG_DUPLICATE_AADHAR));
        }
        let photo = submission.profile_photo.map(|file| self.store_upload(file));
        let aadhar_file = submission.aadhar_file.map(|file| self.store_upload(file));
        let student = self
            .students
            .get_mut(&id)
            .ok_or(Rejected(MSG_STUDENT_MISSING))?;
        student.name = submission.name;
        student.father_name = submission.father_name;
        student.aadhar_number = submission.aadhar_number;
        if photo.is_some() {
            student.profile_photo = photo;
        }
        if aadhar_file.is_some() {
            student.aadhar_path = aadhar_file;
        }
        Ok(student.clone())
    }

    /// Remove a student together with every contact it owns.
    pub fn delete_student(&mut self, id: i64) -> Result<(), Rejected> {
        self.students
            .remove(&id)
            .ok_or(Rejected(MSG_STUDENT_MISSING))?;
        self.contacts.retain(|_, c| c.student_id.0 != id);
        Ok(())
    }

    pub fn all_contacts(&self) -> Vec<Contact> {
        self.contacts.values().cloned().collect()
    }

    pub fn contacts_of(&self, student: i64) -> Vec<Contact> {
        self.contacts
            .values()
            .rev()
            .filter(|c| c.student_id.0 == student)
            .cloned()
            .collect()
    }

    pub fn contact(&self, id: i64) -> Option<Contact> {
        self.contacts.get(&id).cloned()
    }

    pub fn seed_contact(&mut self, mut contact: Contact) -> Contact {
        if contact.id.0 <= 0 {
            self.next_contact += 1;
            contact.id = ContactId(self.next_contact);
        }
        self.next_contact = self.next_contact.max(contact.id.0);
        self.contacts.insert(contact.id.0, contact.clone());
        contact
    }

    /// Insert a contact; the owner must exist.
    pub fn create_contact(&mut self, draft: ContactDraft) -> Option<Contact> {
        if !self.students.contains_key(&draft.student_id.0) {
            return None;
        }
        self.next_contact += 1;
        let contact = Contact {
            id: ContactId(self.next_contact),
            student_id: draft.student_id,
            mob_no: draft.mob_no,
            city: draft.city,
            address: draft.address,
        };
        self.contacts.insert(contact.id.0, contact.clone());
        Some(contact)
    }

    pub fn update_contact(&mut self, draft: ContactDraft) -> Option<Contact> {
        let id = draft.id?;
        if !self.students.contains_key(&draft.student_id.0) {
            return None;
        }
        let contact = self.contacts.get_mut(&id.0)?;
        contact.student_id = draft.student_id;
        contact.mob_no = draft.mob_no;
        contact.city = draft.city;
        contact.address = draft.address;
        Some(contact.clone())
    }

    pub fn delete_contact(&mut self, id: i64) -> bool {
        self.contacts.remove(&id).is_some()
    }

    pub fn upload(&self, name: &str) -> Option<Vec<u8>> {
        self.uploads.get(name).cloned()
    }

    /// Store under a generated name that keeps the original extension.
    fn store_upload(&mut self, file: UploadedFile) -> String {
        self.next_upload += 1;
        let extension = file
            .original_name
            .rfind('.')
            .map(|idx| &file.original_name[idx..])
            .unwrap_or("");
        let name = format!("upload-{:06}{}", self.next_upload, extension);
        self.uploads.insert(name.clone(), file.bytes);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, aadhar: Option<&str>) -> StudentSubmission {
        StudentSubmission {
            name: name.into(),
            father_name: "F".into(),
            aadhar_number: aadhar.map(str::to_owned),
            ..StudentSubmission::default()
        }
    }

    #[test]
    fn listing_is_newest_first() {
        let mut records = Records::default();
        records.create_student(submission("A", None)).unwrap();
        records.create_student(submission("B", None)).unwrap();
        let names: Vec<_> = records.students().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn duplicate_aadhar_is_rejected_except_for_self() {
        let mut records = Records::default();
        let first = records
            .create_student(submission("A", Some("123456789012")))
            .unwrap();
        assert_eq!(
            records.create_student(submission("B", Some("123456789012"))),
            Err(Rejected(MSG_DUPLICATE_AADHAR))
        );
        let mut resubmit = submission("A2", Some("123456789012"));
        resubmit.id = Some(first.id.0);
        assert_eq!(records.update_student(resubmit).unwrap().name, "A2");
    }

    #[test]
    fn delete_cascades_to_contacts() {
        let mut records = Records::default();
        let keep = records.create_student(submission("A", None)).unwrap();
        let gone = records.create_student(submission("B", None)).unwrap();
        records.create_contact(ContactDraft::new(keep.id)).unwrap();
        records.create_contact(ContactDraft::new(gone.id)).unwrap();
        records.delete_student(gone.id.0).unwrap();
        assert!(records.contacts_of(gone.id.0).is_empty());
        assert_eq!(records.contacts_of(keep.id.0).len(), 1);
        assert_eq!(
            records.delete_student(gone.id.0),
            Err(Rejected(MSG_STUDENT_MISSING))
        );
    }

    #[test]
    fn search_matches_any_text_field() {
        let mut records = Records::default();
        records
            .create_student(submission("Asha", Some("111122223333")))
            .unwrap();
        records.create_student(submission("Ravi", None)).unwrap();
        assert_eq!(records.search("ash").len(), 1);
        assert_eq!(records.search("2222").len(), 1);
        assert_eq!(records.search("  ").len(), 2);
        assert!(records.search("zzz").is_empty());
    }

    #[test]
    fn uploads_keep_extension_and_survive_text_updates() {
        let mut records = Records::default();
        let mut first = submission("A", None);
        first.profile_photo = Some(UploadedFile {
            original_name: "me.png".into(),
            bytes: vec![1, 2, 3],
        });
        let created = records.create_student(first).unwrap();
        let stored = created.profile_photo.clone().unwrap();
        assert!(stored.ends_with(".png"));
        assert_eq!(records.upload(&stored), Some(vec![1, 2, 3]));

        let mut edit = submission("A", None);
        edit.id = Some(created.id.0);
        let updated = records.update_student(edit).unwrap();
        assert_eq!(updated.profile_photo, Some(stored));
    }

    #[test]
    fn contact_requires_existing_owner() {
        let mut records = Records::default();
        assert!(records.create_contact(ContactDraft::new(StudentId(9))).is_none());
    }
}
