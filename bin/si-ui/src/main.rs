//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Terminal console launcher and event loop."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use si_common::{init_tracing, AppConfig, LoggingConfig};
use si_core::{Renderer, StudentConsole};
use si_net::HttpGateway;
use tokio::runtime::Runtime;
use tracing::info;

mod app;
mod draw;

use app::{handle_key, Action, App};
use draw::draw_ui;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage students and their contacts from the terminal"
)]
struct Cli {
    /// Configuration file (defaults to configs/studentinfo.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL, including any deployment prefix
    #[arg(long)]
    backend_url: Option<String>,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut candidates: Vec<PathBuf> = cli.config.iter().cloned().collect();
    candidates.extend(AppConfig::DEFAULT_CANDIDATES.iter().map(PathBuf::from));
    let mut config = AppConfig::load(&candidates)?;
    if cli.backend_url.is_some() {
        config.apply_overrides(cli.backend_url.clone());
        config.validate()?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    // stdout belongs to the terminal UI
    let logging = LoggingConfig {
        stdout: false,
        ..config.logging.clone()
    };
    init_tracing("si-ui", &logging)?;
    info!(backend = %config.backend.base(), "starting console");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("unable to build async runtime")?;
    let gateway = HttpGateway::new(&config.backend).context("unable to build HTTP client")?;
    let renderer = Renderer::new(gateway.endpoints().clone());
    let console = StudentConsole::new(Arc::new(gateway), renderer, &config.ui);
    let mut app = App::new(console);
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(50));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = run_app(&mut terminal, &runtime, &mut app, tick_rate);
    cleanup_terminal(&mut terminal)?;
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Runtime,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    terminal.draw(|frame| draw_ui(frame, app))?;
    runtime.block_on(app.console.load_students());
    terminal.draw(|frame| draw_ui(frame, app))?;
    loop {
        let event = if event::poll(tick_rate)? {
            Some(event::read()?)
        } else {
            None
        };
        if !step(terminal, runtime, app, event, Instant::now())? {
            break;
        }
    }
    info!("console closed");
    Ok(())
}

/// One loop pass: expire the notification, apply `event`, redraw.
/// Returns `false` once the user quits.
fn step<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Runtime,
    app: &mut App,
    event: Option<Event>,
    now: Instant,
) -> Result<bool> {
    // Expiry runs on every pass, so steady key input cannot keep a notification alive.
    app.console.tick(now);
    if let Some(Event::Key(key)) = event {
        let action = handle_key(app, key);
        if action == Action::Quit {
            return Ok(false);
        }
        perform(terminal, runtime, app, action)?;
    }
    terminal.draw(|frame| draw_ui(frame, app))?;
    Ok(true)
}

/// Run a deferred action. Saves draw once with the busy submit control before the call.
fn perform<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Runtime,
    app: &mut App,
    action: Action,
) -> Result<()> {
    let console = &mut app.console;
    match action {
        Action::None | Action::Quit => {}
        Action::Search => runtime.block_on(console.search()),
        Action::ClearSearch => runtime.block_on(console.clear_search()),
        Action::Reload => runtime.block_on(console.reload()),
        Action::EditStudent(id) => runtime.block_on(console.open_edit_student(id)),
        Action::Confirm(answer) => runtime.block_on(console.resolve_confirmation(answer)),
        Action::OpenContacts(id) => runtime.block_on(console.open_contacts(id)),
        Action::EditContact(id) => runtime.block_on(console.edit_contact(id)),
        Action::CancelContactForm => runtime.block_on(console.cancel_contact_form()),
        Action::SaveStudent => {
            if let Some(save) = console.begin_student_save() {
                terminal.draw(|frame| draw_ui(frame, app))?;
                runtime.block_on(app.console.finish_student_save(save));
            }
        }
        Action::SaveContact => {
            if let Some(save) = console.begin_contact_save() {
                terminal.draw(|frame| draw_ui(frame, app))?;
                runtime.block_on(app.console.finish_contact_save(save));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_support {
    use std::sync::Arc;

    use si_common::{BackendConfig, UiConfig};
    use si_core::{Renderer, StudentConsole};
    use si_net::HttpGateway;

    use crate::app::App;

    /// App wired to a backend that is never contacted.
    pub fn offline_app() -> App {
        app_for(&BackendConfig::default().base_url)
    }

    /// App talking to the backend at `base_url`.
    pub fn app_for(base_url: &str) -> App {
        let config = BackendConfig {
            base_url: base_url.to_owned(),
            ..BackendConfig::default()
        };
        let gateway = HttpGateway::new(&config).unwrap();
        let renderer = Renderer::new(gateway.endpoints().clone());
        App::new(StudentConsole::new(
            Arc::new(gateway),
            renderer,
            &UiConfig::default(),
        ))
    }
}
