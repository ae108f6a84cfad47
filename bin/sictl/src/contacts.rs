//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Contact subcommands of the control CLI."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Args, Subcommand};
use si_core::view::{contact_card, contact_listing, text_table, CONTACT_COLUMNS};
use si_core::{ContactCard, ListingView, PendingConfirmation};
use si_model::{ContactDraft, ContactId, Operation, StudentId};
use si_net::StudentGateway;

use crate::{call_failed, check_hints, confirm, report, Backend};

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List the contacts of a student.
    List {
        #[arg(value_name = "STUDENT_ID")]
        student: StudentId,
    },
    /// Show one contact.
    Show {
        #[arg(value_name = "ID")]
        id: ContactId,
    },
    /// Add a contact to a student.
    Add {
        #[arg(value_name = "STUDENT_ID")]
        student: StudentId,
        #[command(flatten)]
        fields: ContactArgs,
    },
    /// Update a contact; omitted fields keep their stored values.
    Update {
        #[arg(value_name = "ID")]
        id: ContactId,
        #[command(flatten)]
        fields: ContactArgs,
    },
    /// Delete a contact.
    Delete {
        #[arg(value_name = "ID")]
        id: ContactId,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    /// Ten digit mobile number.
    #[arg(long, value_name = "DIGITS")]
    mobile: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// Postal address; `\n` separates lines.
    #[arg(long)]
    address: Option<String>,
}

impl ContactArgs {
    fn apply(self, draft: &mut ContactDraft) {
        if let Some(mobile) = self.mobile {
            draft.mob_no = mobile.trim().to_owned();
        }
        if let Some(city) = self.city {
            draft.city = city;
        }
        if let Some(address) = self.address {
            draft.address = address.replace("\\n", "\n");
        }
    }
}

pub fn run(command: ContactsCommand, backend: &Backend) -> Result<()> {
    let gateway = &backend.gateway;
    let rt = &backend.runtime;
    match command {
        ContactsCommand::List { student } => {
            let contacts = rt
                .block_on(gateway.list_contacts(student))
                .map_err(|err| call_failed(Operation::ListContacts, err))?;
            println!("Contacts of student {student}");
            print_listing(&contact_listing(&contacts));
        }
        ContactsCommand::Show { id } => {
            let contact = rt
                .block_on(gateway.get_contact(id))
                .map_err(|err| call_failed(Operation::GetContact, err))?;
            let card = contact_card(&contact);
            println!("{:<12} {}", "Student", contact.student_id);
            for (header, cell) in CONTACT_COLUMNS.iter().zip(card.cells()) {
                println!("{header:<12} {}", cell.replace('\n', "\n             "));
            }
        }
        ContactsCommand::Add { student, fields } => {
            let mut draft = ContactDraft::new(student);
            fields.apply(&mut draft);
            check_hints(draft.hint_violations())?;
            let outcome = rt
                .block_on(gateway.create_contact(&draft))
                .map_err(|err| call_failed(Operation::CreateContact, err))?;
            report(outcome)?;
        }
        ContactsCommand::Update { id, fields } => {
            let current = rt
                .block_on(gateway.get_contact(id))
                .map_err(|err| call_failed(Operation::GetContact, err))?;
            let mut draft = ContactDraft::from_contact(&current);
            fields.apply(&mut draft);
            check_hints(draft.hint_violations())?;
            let outcome = rt
                .block_on(gateway.update_contact(&draft))
                .map_err(|err| call_failed(Operation::UpdateContact, err))?;
            report(outcome)?;
        }
        ContactsCommand::Delete { id, yes } => {
            if !confirm(PendingConfirmation::DeleteContact(id).prompt(), yes)? {
                return Ok(());
            }
            let outcome = rt
                .block_on(gateway.delete_contact(id))
                .map_err(|err| call_failed(Operation::DeleteContact, err))?;
            report(outcome)?;
        }
    }
    Ok(())
}

fn print_listing(listing: &ListingView<ContactCard>) {
    match listing {
        ListingView::Rows(cards) => {
            let cells: Vec<_> = cards.iter().map(ContactCard::cells).collect();
            println!("{}", text_table(CONTACT_COLUMNS, &cells));
        }
        ListingView::Empty(message) => println!("{message}"),
        ListingView::Loading(message) => println!("{message}"),
        ListingView::Failed { headline, detail } => println!("{headline}\n{detail}"),
    }
}
