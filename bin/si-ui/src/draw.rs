//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "ratatui drawing for tables, modals, prompt and notification line."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;
use si_core::session::{ContactField, StudentField};
use si_core::view::{ListingView, STUDENT_COLUMNS};
use si_core::{ContactCard, ContactSession, Severity, StudentFormState, StudentRow};

use crate::app::{App, Focus};

const HELP_TABLE: &str =
    "/ search  ^L clear  a add  e edit  d delete  c contacts  r reload  x dismiss  q quit";
const HELP_FORM: &str = "Tab next field  Enter save  Esc close";
const HELP_CONTACTS: &str = "a add  e edit  d delete  x dismiss  Esc close";
const HELP_CONTACT_FORM: &str = "Tab next field  ^J new address line  Enter save  Esc cancel";
const HELP_CONFIRM: &str = "y confirm  n cancel";

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_search(frame, app, layout[0]);
    draw_students(frame, app, layout[1]);
    draw_notification(frame, app, layout[2]);

    let console = &app.console;
    let help = if console.confirmation().is_some() {
        HELP_CONFIRM
    } else if console.modal().is_open() {
        HELP_FORM
    } else if let Some(session) = console.contacts() {
        if session.editor.form().is_some() {
            HELP_CONTACT_FORM
        } else {
            HELP_CONTACTS
        }
    } else {
        HELP_TABLE
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::Gray)),
        layout[3],
    );

    if let Some(session) = console.contacts() {
        draw_contacts(frame, session, area);
    }
    if let Some(form) = console.modal().form() {
        draw_student_form(frame, form, area);
    }
    if let Some(pending) = console.confirmation() {
        draw_confirm(frame, pending.prompt(), area);
    }
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::raw(app.console.search_input().to_owned())];
    if focused {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    let title = match app.console.active_keyword() {
        Some(keyword) => format!("Search (filtered by \"{keyword}\")"),
        None => "Search".to_owned(),
    };
    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    frame.render_widget(search, area);
}

fn listing_message<T>(listing: &ListingView<T>) -> Option<Vec<Line<'static>>> {
    match listing {
        ListingView::Rows(_) => None,
        ListingView::Loading(text) => Some(vec![Line::from(*text)]),
        ListingView::Empty(text) => Some(vec![Line::from(text.clone())]),
        ListingView::Failed { headline, detail } => Some(vec![
            Line::styled(headline.clone(), Style::default().fg(Color::Red)),
            Line::styled(detail.clone(), Style::default().fg(Color::DarkGray)),
        ]),
    }
}

fn draw_students(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Students");
    let listing = app.console.students();
    if let Some(lines) = listing_message(listing) {
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let header = Row::new(STUDENT_COLUMNS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = listing.rows().iter().map(student_row).collect();
    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
        Constraint::Length(14),
        Constraint::Percentage(18),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = TableState::default();
    state.select(Some(app.console.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn student_row(row: &StudentRow) -> Row<'static> {
    let link = Style::default().fg(Color::Cyan);
    let muted = Style::default().fg(Color::DarkGray);
    let attachment = |label: &str, linked: bool| {
        Cell::from(label.to_owned()).style(if linked { link } else { muted })
    };
    Row::new(vec![
        Cell::from(row.id_text.clone()),
        Cell::from(row.name.clone()),
        Cell::from(row.father_name.clone()),
        Cell::from(row.aadhar_number.clone()),
        attachment(row.photo.label(), row.photo.url().is_some()),
        attachment(row.aadhar_file.label(), row.aadhar_file.url().is_some()),
    ])
}

fn draw_notification(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.console.notification() else {
        return;
    };
    let style = match notification.severity {
        Severity::Success => Style::default().fg(Color::Black).bg(Color::Green),
        Severity::Error => Style::default().fg(Color::White).bg(Color::Red),
    };
    frame.render_widget(
        Paragraph::new(notification.message.clone()).style(style),
        area,
    );
}

/// Rectangle of `percent_x` by `height` centred in `area`.
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker.to_owned()),
        Span::styled(
            format!("{label:<14}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_owned(), value_style),
    ])
}

fn submit_line(label: &str, busy: bool) -> Line<'static> {
    let style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    Line::styled(format!("[ {label} ]"), style)
}

fn draw_student_form(frame: &mut Frame, form: &StudentFormState, area: Rect) {
    let popup = centered(area, 70, 10);
    let mut lines: Vec<Line> = StudentField::ALL
        .iter()
        .map(|field| input_line(field.label(), form.inputs.field(*field), form.focus == *field))
        .collect();
    lines.push(Line::from(""));
    lines.push(submit_line(form.submit_label(), form.submitting));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(form.title()),
        ),
        popup,
    );
}

fn contact_item(card: &ContactCard) -> ListItem<'static> {
    let mut lines = vec![Line::styled(
        card.mobile.clone(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    lines.push(Line::from(format!("  City: {}", card.city)));
    for (idx, part) in card.address.lines().enumerate() {
        let prefix = if idx == 0 { "  Address: " } else { "           " };
        lines.push(Line::from(format!("{prefix}{part}")));
    }
    ListItem::new(lines)
}

fn draw_contacts(frame: &mut Frame, session: &ContactSession, area: Rect) {
    let popup = centered(area, 80, area.height.saturating_sub(4).max(10));
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Contacts (student {})", session.student_id));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let form_height = if session.editor.form().is_some() { 7 } else { 0 };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(form_height)])
        .split(inner);

    match listing_message(&session.listing) {
        Some(lines) => frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), parts[0]),
        None => {
            let items: Vec<ListItem> = session.listing.rows().iter().map(contact_item).collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("▶ ");
            let mut state = ListState::default();
            state.select(Some(session.selected));
            frame.render_stateful_widget(list, parts[0], &mut state);
        }
    }

    if let Some(form) = session.editor.form() {
        let mut lines: Vec<Line> = ContactField::ALL
            .iter()
            .map(|field| {
                // Stored line breaks show as a marker on the single input line.
                let value = form.field(*field).replace('\n', " ↵ ");
                input_line(field.label(), &value, form.focus == *field)
            })
            .collect();
        lines.push(submit_line(form.submit_label(), form.submitting));
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title(form.title())),
            parts[1],
        );
    }
}

fn draw_confirm(frame: &mut Frame, prompt: &str, area: Rect) {
    let popup = centered(area, 60, 5);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(vec![Line::from(prompt.to_owned()), Line::from(""), Line::from("(y/n)")])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .border_style(Style::default().fg(Color::Red)),
            ),
        popup,
    );
}
