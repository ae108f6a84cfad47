//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Backend URL layout under a configurable base."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use si_model::{ContactId, StudentId};

/// URL layout of the backend, rooted at a runtime-configured base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Root every path at `base`, which may carry a deployment prefix.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim().trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn at(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /students/list`
    pub fn students_list(&self) -> String {
        self.at("/students/list")
    }

    /// `GET /students/search`; the keyword travels as a query parameter.
    pub fn students_search(&self) -> String {
        self.at("/students/search")
    }

    /// `GET|DELETE /students/{id}`
    pub fn student(&self, id: StudentId) -> String {
        self.at(&format!("/students/{id}"))
    }

    /// `POST /students/add`
    pub fn students_add(&self) -> String {
        self.at("/students/add")
    }

    /// `POST /students/update`
    pub fn students_update(&self) -> String {
        self.at("/students/update")
    }

    /// `GET /contacts/student/{studentId}`
    pub fn contacts_for(&self, student: StudentId) -> String {
        self.at(&format!("/contacts/student/{student}"))
    }

    /// `GET|DELETE /contacts/{id}`
    pub fn contact(&self, id: ContactId) -> String {
        self.at(&format!("/contacts/{id}"))
    }

    /// `POST /contacts/add`
    pub fn contacts_add(&self) -> String {
        self.at("/contacts/add")
    }

    /// `PUT /contacts/update`
    pub fn contacts_update(&self) -> String {
        self.at("/contacts/update")
    }

    /// Link to an uploaded file stored by the backend.
    pub fn upload(&self, file_name: &str) -> String {
        self.at(&format!("/uploads/{file_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_keep_deployment_prefix() {
        let endpoints = Endpoints::new("http://host:8080/StudentInfo/");
        assert_eq!(endpoints.base(), "http://host:8080/StudentInfo");
        assert_eq!(
            endpoints.student(StudentId(4)),
            "http://host:8080/StudentInfo/students/4"
        );
        assert_eq!(
            endpoints.contacts_for(StudentId(4)),
            "http://host:8080/StudentInfo/contacts/student/4"
        );
        assert_eq!(
            endpoints.upload("a1b2.png"),
            "http://host:8080/StudentInfo/uploads/a1b2.png"
        );
    }

    #[test]
    fn root_deployment_has_no_prefix() {
        let endpoints = Endpoints::new("http://127.0.0.1:9000");
        assert_eq!(endpoints.students_list(), "http://127.0.0.1:9000/students/list");
        assert_eq!(endpoints.contact(ContactId(2)), "http://127.0.0.1:9000/contacts/2");
    }
}
