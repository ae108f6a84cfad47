//! ---
//! si_section: "05-interaction-core"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Interaction core shared by the console and the CLI."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Every user action runs the same sequence: gateway call, state update, view
//! refresh, notification. The front ends only translate input into calls on
//! [`StudentConsole`] and draw what it exposes.

pub mod console;
pub mod notify;
pub mod session;
pub mod view;

pub use console::{failure_message, StudentConsole, SubmissionKey};
pub use notify::{Notification, NotificationSurface, Severity};
pub use session::{
    ContactEditor, ContactField, ContactFormState, ContactSession, FormMode, PendingConfirmation,
    StudentField, StudentFormState, StudentInputs, StudentModal,
};
pub use view::{Attachment, ContactCard, ListingView, Renderer, StudentRow};
