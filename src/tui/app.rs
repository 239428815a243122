//! Main TUI application state machine.
//!
//! Handles:
//! - Form navigation and field edits
//! - Submission through a background worker
//! - Report overlay and printing

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::gemini::GeminiModel;
use crate::adapters::print::SystemPrinter;
use crate::application::{AssessmentService, PrintableReport, Session};
use crate::config::AppConfig;
use crate::ports::{GenerativeModel, ReportPrinter};

use super::ui::{
    form::{adjust, render_form, FormState},
    render_disclaimer,
    report::{render_report, PrintStatus},
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};

const COARSE_STEP: i32 = 10;

/// Main application state
pub struct App<M = GeminiModel, P = SystemPrinter>
where
    M: GenerativeModel + 'static,
    P: ReportPrinter,
{
    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service, shared with background workers
    service: Arc<AssessmentService<M>>,

    printer: P,

    /// Input model and submission lifecycle
    session: Session,

    form_state: FormState,

    /// Report for the current successful result (overlay open while set)
    report: Option<PrintableReport>,

    print_status: Option<PrintStatus>,

    /// Pending assessment worker (if running)
    pending_worker: Option<AssessmentWorkerHandle>,
}

impl App {
    /// Create a new application instance from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client or print command cannot be set up.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model = Arc::new(GeminiModel::new(&config.model)?);
        let printer = SystemPrinter::new(&config.print_command)?;
        Ok(Self::with_dependencies(
            Arc::new(AssessmentService::new(model)),
            printer,
        ))
    }
}

impl<M, P> App<M, P>
where
    M: GenerativeModel + 'static,
    P: ReportPrinter,
{
    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(service: Arc<AssessmentService<M>>, printer: P) -> Self {
        Self {
            should_quit: false,
            service,
            printer,
            session: Session::new(),
            form_state: FormState::default(),
            report: None,
            print_status: None,
            pending_worker: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn report(&self) -> Option<&PrintableReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                render_form(f, chunks[0], &self.form_state, &self.session);
                if let Some(report) = &self.report {
                    render_report(f, chunks[0], report, self.print_status.as_ref());
                }
                render_disclaimer(f, chunks[1]);
            })?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    pub fn poll_worker(&mut self) {
        loop {
            let progress = match self
                .pending_worker
                .as_ref()
                .and_then(AssessmentWorkerHandle::try_recv)
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                AssessmentProgress::Requesting => {
                    tracing::debug!("Assessment request in flight");
                }
                AssessmentProgress::Complete { request, outcome } => {
                    self.pending_worker = None;
                    if self.session.resolve(request, outcome) {
                        self.report = self.session.result().map(PrintableReport::new);
                        self.print_status = None;
                    }
                    break;
                }
            }
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.report.is_some() {
            self.handle_report_key(key);
        } else {
            self.handle_form_key(key);
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Left => self.adjust_selected(-1),
            KeyCode::Right | KeyCode::Char(' ') => self.adjust_selected(1),
            KeyCode::PageDown => self.adjust_selected(-COARSE_STEP),
            KeyCode::PageUp => self.adjust_selected(COARSE_STEP),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.session.dismiss();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_report_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('p') | KeyCode::Char('P') => self.print_report(),
            KeyCode::Esc | KeyCode::Enter => {
                self.session.dismiss();
                self.report = None;
                self.print_status = None;
            }
            _ => {}
        }
    }

    fn adjust_selected(&mut self, delta: i32) {
        let Some(field) = self.form_state.selected_field() else {
            return;
        };

        let update = adjust(self.session.input(), field, delta);
        // Values stay out of the log; the field name is enough.
        if self.session.apply(update).is_err() {
            tracing::warn!("Rejected edit for {}", field);
        }
    }

    fn submit(&mut self) {
        // Only one request in flight: the session refuses while pending.
        let Some((request, input)) = self.session.submit() else {
            return;
        };

        self.report = None;
        self.print_status = None;
        self.pending_worker = Some(AssessmentWorker::spawn(
            Arc::clone(&self.service),
            request,
            input,
        ));
    }

    fn print_report(&mut self) {
        let Some(report) = &self.report else {
            return;
        };

        self.print_status = Some(match self.printer.print(&report.render_text()) {
            Ok(()) => PrintStatus::Sent,
            Err(e) => {
                tracing::warn!("Print failed: {}", e);
                PrintStatus::Failed(e.to_string())
            }
        });
    }
}
