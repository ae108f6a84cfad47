//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Keyboard handling for the terminal console."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use si_core::{ContactField, StudentConsole};
use si_model::{ContactId, StudentId};

/// Which input owns the keyboard when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

/// Follow-up work a key press asks for; anything needing the network is deferred
/// to the event loop so it can draw the busy state first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Search,
    ClearSearch,
    Reload,
    EditStudent(StudentId),
    SaveStudent,
    Confirm(bool),
    OpenContacts(StudentId),
    EditContact(ContactId),
    SaveContact,
    CancelContactForm,
}

pub struct App {
    pub console: StudentConsole,
    pub focus: Focus,
}

impl App {
    pub fn new(console: StudentConsole) -> Self {
        Self {
            console,
            focus: Focus::Table,
        }
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// `Ctrl-J` or `Alt-Enter`; plain `Enter` submits.
fn is_line_break(key: &KeyEvent) -> bool {
    is_ctrl(key, 'j')
        || (key.code == KeyCode::Enter && key.modifiers.contains(KeyModifiers::ALT))
}

/// Apply local state changes for `key` and return the deferred action.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    if is_ctrl(&key, 'c') {
        return Action::Quit;
    }
    if app.console.confirmation().is_some() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Confirm(false),
            _ => Action::None,
        };
    }
    if app.console.modal().is_open() {
        return student_form_key(app, key);
    }
    if app.console.contacts().is_some() {
        return contacts_key(app, key);
    }
    match app.focus {
        Focus::Search => search_key(app, key),
        Focus::Table => table_key(app, key),
    }
}

fn student_form_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Esc {
        app.console.close_student_modal();
        return Action::None;
    }
    let Some(form) = app.console.student_form_mut() else {
        return Action::None;
    };
    if form.submitting {
        return Action::None;
    }
    match key.code {
        KeyCode::Enter => return Action::SaveStudent,
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.previous(),
        KeyCode::Backspace => {
            form.inputs.field_mut(form.focus).pop();
        }
        KeyCode::Char(c) => form.inputs.field_mut(form.focus).push(c),
        _ => {}
    }
    Action::None
}

fn contacts_key(app: &mut App, key: KeyEvent) -> Action {
    if let Some(form) = app.console.contact_form_mut() {
        if form.submitting {
            return Action::None;
        }
        if form.focus == ContactField::Address && is_line_break(&key) {
            form.address.push('\n');
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => return Action::CancelContactForm,
            KeyCode::Enter => return Action::SaveContact,
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.previous(),
            KeyCode::Backspace => {
                form.field_mut(form.focus).pop();
            }
            KeyCode::Char(c) => form.field_mut(form.focus).push(c),
            _ => {}
        }
        return Action::None;
    }
    let selected = app.console.contacts().and_then(|s| s.selected_contact());
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.console.close_contacts(),
        KeyCode::Char('a') => app.console.show_add_contact_form(),
        KeyCode::Char('e') => {
            if let Some(id) = selected {
                return Action::EditContact(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected {
                app.console.request_delete_contact(id);
            }
        }
        KeyCode::Char('x') => app.console.dismiss_notification(),
        KeyCode::Down | KeyCode::Char('j') => app.console.select_next_contact(),
        KeyCode::Up | KeyCode::Char('k') => app.console.select_previous_contact(),
        _ => {}
    }
    Action::None
}

fn search_key(app: &mut App, key: KeyEvent) -> Action {
    if is_ctrl(&key, 'l') {
        app.focus = Focus::Table;
        return Action::ClearSearch;
    }
    match key.code {
        KeyCode::Enter => {
            app.focus = Focus::Table;
            return Action::Search;
        }
        KeyCode::Esc => app.focus = Focus::Table,
        KeyCode::Backspace => {
            app.console.search_input_mut().pop();
        }
        KeyCode::Char(c) => app.console.search_input_mut().push(c),
        _ => {}
    }
    Action::None
}

fn table_key(app: &mut App, key: KeyEvent) -> Action {
    if is_ctrl(&key, 'l') {
        return Action::ClearSearch;
    }
    let selected = app.console.selected_student();
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('a') => app.console.open_add_student(),
        KeyCode::Char('r') => return Action::Reload,
        KeyCode::Char('x') => app.console.dismiss_notification(),
        KeyCode::Char('e') => {
            if let Some(id) = selected {
                return Action::EditStudent(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected {
                app.console.request_delete_student(id);
            }
        }
        KeyCode::Char('c') => {
            if let Some(id) = selected {
                return Action::OpenContacts(id);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.console.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.console.select_previous(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_for, offline_app};
    use si_core::session::StudentField;
    use si_testharness::StubBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_into_student_form_follows_focus() {
        let mut app = offline_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('a'))), Action::None);
        for c in "Asha".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Tab));
        for c in "Ravi".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Backspace));
        let form = app.console.modal().form().unwrap();
        assert_eq!(form.inputs.name, "Asha");
        assert_eq!(form.inputs.father_name, "Rav");
        assert_eq!(form.focus, StudentField::FatherName);
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Action::SaveStudent);

        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.console.modal().is_open());
    }

    #[test]
    fn search_focus_captures_text_until_enter() {
        let mut app = offline_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.focus, Focus::Search);
        for c in "qa".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.console.search_input(), "qa");
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Action::Search);
        assert_eq!(app.focus, Focus::Table);
        assert_eq!(handle_key(&mut app, ctrl('l')), Action::ClearSearch);
    }

    #[test]
    fn quit_and_reload_from_table() {
        let mut app = offline_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Action::Reload);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key(&mut app, ctrl('c')), Action::Quit);
    }

    #[test]
    fn row_actions_need_a_selection() {
        let mut app = offline_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('e'))), Action::None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('c'))), Action::None);
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert!(app.console.confirmation().is_none());
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = offline_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key(&mut app, key), Action::None);
    }

    #[test]
    fn address_accepts_line_breaks_before_enter_saves() {
        let server = tokio::runtime::Runtime::new().unwrap();
        let backend = StubBackend::new();
        let student = backend.insert_student("Asha", "Ravi");
        let handle = server.block_on(backend.spawn()).unwrap();
        let mut app = app_for(handle.base_url());
        server.block_on(app.console.open_contacts(student.id));

        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Tab));
        for c in "l1".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(handle_key(&mut app, ctrl('j')), Action::None);
        for c in "l2".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        let form = app.console.contacts().unwrap().editor.form().unwrap();
        assert_eq!(form.focus, ContactField::Address);
        assert_eq!(form.address, "l1\nl2");

        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert_eq!(handle_key(&mut app, alt_enter), Action::None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Action::SaveContact);
        let form = app.console.contacts().unwrap().editor.form().unwrap();
        assert_eq!(form.address, "l1\nl2\n");

        server.block_on(handle.shutdown()).unwrap();
    }
}
