//! ---
//! si_section: "01-data-model"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Input pattern hints for student and contact forms."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Client-side hints equivalent to `required`/`pattern` form attributes.
//! The backend is not assumed to enforce any of them.

use crate::contact::ContactDraft;
use crate::student::StudentForm;

/// Digits in an Aadhar identifier.
pub const AADHAR_DIGITS: usize = 12;
/// Digits in a mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// A form field that does not match its input hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Message shown to the user.
    pub message: &'static str,
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

impl StudentForm {
    /// Fields that violate their hint, in form order.
    pub fn hint_violations(&self) -> Vec<HintViolation> {
        let mut violations = Vec::new();
        if !required(&self.name) {
            violations.push(HintViolation {
                field: "name",
                message: "Name is required",
            });
        }
        if !required(&self.father_name) {
            violations.push(HintViolation {
                field: "fatherName",
                message: "Father name is required",
            });
        }
        let aadhar = self.aadhar_number.trim();
        if !aadhar.is_empty() && !is_digits(aadhar, AADHAR_DIGITS) {
            violations.push(HintViolation {
                field: "aadharNumber",
                message: "Aadhar number must be 12 digits",
            });
        }
        violations
    }
}

impl ContactDraft {
    /// Fields that violate their hint, in form order.
    pub fn hint_violations(&self) -> Vec<HintViolation> {
        let mut violations = Vec::new();
        if !is_digits(self.mob_no.trim(), MOBILE_DIGITS) {
            violations.push(HintViolation {
                field: "mobNo",
                message: "Mobile number must be 10 digits",
            });
        }
        if !required(&self.city) {
            violations.push(HintViolation {
                field: "city",
                message: "City is required",
            });
        }
        if !required(&self.address) {
            violations.push(HintViolation {
                field: "address",
                message: "Address is required",
            });
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::StudentId;

    #[test]
    fn student_hints() {
        let mut form = StudentForm {
            name: "A".into(),
            father_name: "F".into(),
            ..StudentForm::default()
        };
        assert!(form.hint_violations().is_empty());

        form.aadhar_number = "12345".into();
        let fields: Vec<_> = form.hint_violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["aadharNumber"]);

        form.aadhar_number = "123456789012".into();
        form.name = "  ".into();
        assert_eq!(form.hint_violations()[0].message, "Name is required");
    }

    #[test]
    fn contact_hints() {
        let mut draft = ContactDraft::new(StudentId(1));
        assert_eq!(draft.hint_violations().len(), 3);

        draft.mob_no = "98765x3210".into();
        draft.city = "Pune".into();
        draft.address = "1 Main St".into();
        assert_eq!(draft.hint_violations()[0].field, "mobNo");

        draft.mob_no = "9876543210".into();
        assert!(draft.hint_violations().is_empty());
    }
}
