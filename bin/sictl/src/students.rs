//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Student subcommands of the control CLI."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use si_core::view::{text_table, STUDENT_COLUMNS};
use si_core::{Attachment, ListingView, PendingConfirmation, StudentRow};
use si_model::{Operation, StudentForm, StudentId, Upload};
use si_net::StudentGateway;

use crate::{call_failed, check_hints, confirm, report, Backend};

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List every student, newest first.
    List,
    /// Search students by keyword; a blank keyword lists everyone.
    Search {
        #[arg(value_name = "KEYWORD", default_value = "")]
        keyword: String,
    },
    /// Show one student with links to uploaded files.
    Show {
        #[arg(value_name = "ID")]
        id: StudentId,
    },
    /// Create a student.
    Add(StudentArgs),
    /// Update a student; omitted fields keep their stored values.
    Update {
        #[arg(value_name = "ID")]
        id: StudentId,
        #[command(flatten)]
        fields: StudentArgs,
    },
    /// Delete a student and its contacts.
    Delete {
        #[arg(value_name = "ID")]
        id: StudentId,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "father-name", value_name = "NAME")]
    father_name: Option<String>,
    /// Twelve digit Aadhar number.
    #[arg(long, value_name = "DIGITS")]
    aadhar: Option<String>,
    /// Profile photo to upload.
    #[arg(long, value_name = "FILE")]
    photo: Option<PathBuf>,
    /// Aadhar document to upload.
    #[arg(long = "aadhar-file", value_name = "FILE")]
    aadhar_file: Option<PathBuf>,
}

impl StudentArgs {
    fn apply(self, form: &mut StudentForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(father_name) = self.father_name {
            form.father_name = father_name;
        }
        if let Some(aadhar) = self.aadhar {
            form.aadhar_number = aadhar.trim().to_owned();
        }
        form.profile_photo = self.photo.map(Upload::new);
        form.aadhar_file = self.aadhar_file.map(Upload::new);
    }
}

pub fn run(command: StudentsCommand, backend: &Backend) -> Result<()> {
    let gateway = &backend.gateway;
    let rt = &backend.runtime;
    match command {
        StudentsCommand::List => {
            let students = rt
                .block_on(gateway.list_students())
                .map_err(|err| call_failed(Operation::ListStudents, err))?;
            print_listing(&backend.renderer.student_listing(&students, None));
        }
        StudentsCommand::Search { keyword } => {
            let keyword = keyword.trim();
            let (students, filter) = if keyword.is_empty() {
                let students = rt
                    .block_on(gateway.list_students())
                    .map_err(|err| call_failed(Operation::ListStudents, err))?;
                (students, None)
            } else {
                let students = rt
                    .block_on(gateway.search_students(keyword))
                    .map_err(|err| call_failed(Operation::SearchStudents, err))?;
                (students, Some(keyword))
            };
            print_listing(&backend.renderer.student_listing(&students, filter));
        }
        StudentsCommand::Show { id } => {
            let student = rt
                .block_on(gateway.get_student(id))
                .map_err(|err| call_failed(Operation::GetStudent, err))?;
            let row = backend.renderer.student_row(&student);
            for (header, cell) in STUDENT_COLUMNS.iter().zip(row.cells()) {
                println!("{header:<12} {cell}");
            }
            for attachment in [&row.photo, &row.aadhar_file] {
                if let Attachment::Link { label, url } = attachment {
                    println!("{label}: {url}");
                }
            }
        }
        StudentsCommand::Add(fields) => {
            let mut form = StudentForm::default();
            fields.apply(&mut form);
            check_hints(form.hint_violations())?;
            let outcome = rt
                .block_on(gateway.create_student(&form))
                .map_err(|err| call_failed(Operation::CreateStudent, err))?;
            report(outcome)?;
        }
        StudentsCommand::Update { id, fields } => {
            let current = rt
                .block_on(gateway.get_student(id))
                .map_err(|err| call_failed(Operation::GetStudent, err))?;
            let mut form = StudentForm::from_student(&current);
            fields.apply(&mut form);
            check_hints(form.hint_violations())?;
            let outcome = rt
                .block_on(gateway.update_student(id, &form))
                .map_err(|err| call_failed(Operation::UpdateStudent, err))?;
            report(outcome)?;
        }
        StudentsCommand::Delete { id, yes } => {
            if !confirm(PendingConfirmation::DeleteStudent(id).prompt(), yes)? {
                return Ok(());
            }
            let outcome = rt
                .block_on(gateway.delete_student(id))
                .map_err(|err| call_failed(Operation::DeleteStudent, err))?;
            report(outcome)?;
        }
    }
    Ok(())
}

fn print_listing(listing: &ListingView<StudentRow>) {
    match listing {
        ListingView::Rows(rows) => {
            let cells: Vec<_> = rows.iter().map(StudentRow::cells).collect();
            println!("{}", text_table(STUDENT_COLUMNS, &cells));
        }
        ListingView::Empty(message) => println!("{message}"),
        ListingView::Loading(message) => println!("{message}"),
        ListingView::Failed { headline, detail } => println!("{headline}\n{detail}"),
    }
}
