//! ---
//! si_section: "05-interaction-core"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Pure mapping from records to display rows and cards."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Rendering is total: missing optional fields turn into fixed placeholders,
//! never into errors. Output order always equals input order.

use si_model::{Contact, ContactId, Student, StudentId};
use si_net::Endpoints;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_PHOTO: &str = "No Photo";
pub const NO_FILE: &str = "No File";
pub const NO_MOBILE: &str = "No Mobile";
pub const VIEW_AADHAR: &str = "View Aadhar";

pub const LOADING_STUDENTS: &str = "Loading students...";
pub const SEARCHING: &str = "Searching...";
pub const NO_STUDENTS: &str = "No students found. Click \"Add Student\" to create one.";
pub const NO_CONTACTS: &str = "No contacts found for this student.";
pub const LOADING_CONTACTS: &str = "Loading contacts...";
pub const BACKEND_HINT: &str = "Make sure your backend server is running";

pub const STUDENT_COLUMNS: [&str; 6] = ["ID", "Name", "Father Name", "Aadhar", "Photo", "Aadhar File"];
pub const CONTACT_COLUMNS: [&str; 4] = ["ID", "Mobile", "City", "Address"];

/// Link to an uploaded file, or the placeholder shown when there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Uploaded file served under `/uploads`.
    Link { label: String, url: String },
    /// Placeholder text, e.g. [`NO_PHOTO`].
    Missing(&'static str),
}

impl Attachment {
    /// Text shown in a table cell.
    pub fn label(&self) -> &str {
        match self {
            Attachment::Link { label, .. } => label,
            Attachment::Missing(placeholder) => placeholder,
        }
    }

    /// Absolute URL of the file, when there is one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Attachment::Link { url, .. } => Some(url),
            Attachment::Missing(_) => None,
        }
    }
}

/// One table row per student, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    /// Key of the row; actions on the row target this student.
    pub id: StudentId,
    /// Displayed id, [`NOT_AVAILABLE`] when the id is not positive.
    pub id_text: String,
    /// Name or [`NOT_AVAILABLE`].
    pub name: String,
    /// Father's name or [`NOT_AVAILABLE`].
    pub father_name: String,
    /// Aadhar number or [`NOT_AVAILABLE`].
    pub aadhar_number: String,
    /// Profile photo link or [`NO_PHOTO`].
    pub photo: Attachment,
    /// Aadhar document link labelled [`VIEW_AADHAR`], or [`NO_FILE`].
    pub aadhar_file: Attachment,
}

impl StudentRow {
    /// Cell texts in [`STUDENT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.id_text.clone(),
            self.name.clone(),
            self.father_name.clone(),
            self.aadhar_number.clone(),
            self.photo.label().to_owned(),
            self.aadhar_file.label().to_owned(),
        ]
    }
}

/// One card per contact, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    /// Key of the card; edit and delete target this contact.
    pub id: ContactId,
    /// Mobile number or [`NO_MOBILE`].
    pub mobile: String,
    /// City or [`NOT_AVAILABLE`].
    pub city: String,
    /// Address, possibly multi-line, or [`NOT_AVAILABLE`].
    pub address: String,
}

impl ContactCard {
    /// Cell texts in [`CONTACT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.mobile.clone(),
            self.city.clone(),
            self.address.clone(),
        ]
    }
}

/// What a list area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView<T> {
    /// Request in progress; the text says which.
    Loading(&'static str),
    /// Request succeeded with no records.
    Empty(String),
    /// One entry per record, in received order.
    Rows(Vec<T>),
    /// Inline error panel replacing the data view.
    Failed { headline: String, detail: String },
}

impl<T> ListingView<T> {
    /// Rendered entries; empty for every state but [`ListingView::Rows`].
    pub fn rows(&self) -> &[T] {
        match self {
            ListingView::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListingView::Loading(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListingView::Failed { .. })
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        value.to_owned()
    }
}

/// Stateless renderer; only knows where uploads are served from.
#[derive(Debug, Clone)]
pub struct Renderer {
    endpoints: Endpoints,
}

impl Renderer {
    /// Renderer linking uploads under `endpoints`.
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Map one student to its row. Never fails; gaps become placeholders.
    pub fn student_row(&self, student: &Student) -> StudentRow {
        let photo = match student.profile_photo.as_deref() {
            Some(file) => Attachment::Link {
                label: file.to_owned(),
                url: self.endpoints.upload(file),
            },
            None => Attachment::Missing(NO_PHOTO),
        };
        let aadhar_file = match student.aadhar_path.as_deref() {
            Some(file) => Attachment::Link {
                label: VIEW_AADHAR.to_owned(),
                url: self.endpoints.upload(file),
            },
            None => Attachment::Missing(NO_FILE),
        };
        StudentRow {
            id: student.id,
            id_text: if student.id.0 > 0 {
                student.id.to_string()
            } else {
                NOT_AVAILABLE.to_owned()
            },
            name: or_placeholder(&student.name),
            father_name: or_placeholder(&student.father_name),
            aadhar_number: or_placeholder(student.aadhar_number.as_deref().unwrap_or_default()),
            photo,
            aadhar_file,
        }
    }

    /// One row per student, in input order.
    pub fn student_rows(&self, students: &[Student]) -> Vec<StudentRow> {
        students.iter().map(|s| self.student_row(s)).collect()
    }

    /// Listing for a full load (`keyword == None`) or a search.
    pub fn student_listing(
        &self,
        students: &[Student],
        keyword: Option<&str>,
    ) -> ListingView<StudentRow> {
        if students.is_empty() {
            return ListingView::Empty(match keyword {
                Some(keyword) => format!("No students found matching \"{keyword}\""),
                None => NO_STUDENTS.to_owned(),
            });
        }
        ListingView::Rows(self.student_rows(students))
    }
}

/// Map one contact to its card.
pub fn contact_card(contact: &Contact) -> ContactCard {
    ContactCard {
        id: contact.id,
        mobile: if contact.mob_no.trim().is_empty() {
            NO_MOBILE.to_owned()
        } else {
            contact.mob_no.clone()
        },
        city: or_placeholder(&contact.city),
        address: or_placeholder(&contact.address),
    }
}

/// Cards for a contact list, or the empty message.
pub fn contact_listing(contacts: &[Contact]) -> ListingView<ContactCard> {
    if contacts.is_empty() {
        return ListingView::Empty(NO_CONTACTS.to_owned());
    }
    ListingView::Rows(contacts.iter().map(contact_card).collect())
}

/// Inline panel for a failed student load or search.
pub fn students_failed(message: &str) -> ListingView<StudentRow> {
    ListingView::Failed {
        headline: format!("Error loading students: {message}"),
        detail: BACKEND_HINT.to_owned(),
    }
}

/// Inline panel for a failed contact load.
pub fn contacts_failed(message: &str) -> ListingView<ContactCard> {
    ListingView::Failed {
        headline: "Error loading contacts.".to_owned(),
        detail: message.to_owned(),
    }
}

/// Fixed-width text table used by the CLI.
pub fn text_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            // Multi-line addresses are flattened for the table.
            *width = (*width).max(cell.replace('\n', " ").chars().count());
        }
    }
    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().map(|h| h.to_string()).collect()));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(row.iter().map(|c| c.replace('\n', " ")).collect()));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(Endpoints::new("http://host:8080/StudentInfo"))
    }

    #[test]
    fn one_row_per_student_in_received_order() {
        let students = vec![
            Student::new(3, "C", "F"),
            Student::new(1, "A", "F"),
            Student::new(2, "B", "F"),
        ];
        let rows = renderer().student_rows(&students);
        let ids: Vec<_> = rows.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn missing_optionals_use_placeholders() {
        let row = renderer().student_row(&Student::new(1, "", "F"));
        assert_eq!(row.name, NOT_AVAILABLE);
        assert_eq!(row.aadhar_number, NOT_AVAILABLE);
        assert_eq!(row.photo, Attachment::Missing(NO_PHOTO));
        assert_eq!(row.aadhar_file.label(), NO_FILE);
        assert_eq!(row.aadhar_file.url(), None);
    }

    #[test]
    fn uploads_link_under_base_url() {
        let mut student = Student::new(1, "A", "F");
        student.profile_photo = Some("p.png".into());
        student.aadhar_path = Some("a.pdf".into());
        let row = renderer().student_row(&student);
        assert_eq!(
            row.photo.url(),
            Some("http://host:8080/StudentInfo/uploads/p.png")
        );
        assert_eq!(row.aadhar_file.label(), VIEW_AADHAR);
        assert_eq!(
            row.aadhar_file.url(),
            Some("http://host:8080/StudentInfo/uploads/a.pdf")
        );
    }

    #[test]
    fn empty_listings_are_not_errors() {
        let r = renderer();
        assert_eq!(r.student_listing(&[], None), ListingView::Empty(NO_STUDENTS.into()));
        assert_eq!(
            r.student_listing(&[], Some("zed")),
            ListingView::Empty("No students found matching \"zed\"".into())
        );
        assert_eq!(contact_listing(&[]), ListingView::Empty(NO_CONTACTS.into()));
    }

    #[test]
    fn contact_card_placeholders() {
        let card = contact_card(&Contact {
            id: ContactId(1),
            student_id: StudentId(1),
            mob_no: String::new(),
            city: String::new(),
            address: "x".into(),
        });
        assert_eq!(card.mobile, NO_MOBILE);
        assert_eq!(card.city, NOT_AVAILABLE);
        assert_eq!(card.address, "x");
    }

    #[test]
    fn failure_panels_carry_message() {
        match students_failed("backend responded with HTTP 500") {
            ListingView::Failed { headline, detail } => {
                assert_eq!(headline, "Error loading students: backend responded with HTTP 500");
                assert_eq!(detail, BACKEND_HINT);
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert!(contacts_failed("boom").is_failed());
    }

    #[test]
    fn text_table_aligns_columns() {
        let table = text_table(
            ["ID", "Name"],
            &[
                ["1".to_string(), "Asha".to_string()],
                ["10".to_string(), "Bo\nb".to_string()],
            ],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "--  ----");
        assert_eq!(lines[2], "1   Asha");
        assert_eq!(lines[3], "10  Bo b");
    }
}
