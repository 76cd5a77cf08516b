//! folio contact form: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  Contact                                        state: Idle         │
//!   ├─── banner ──────────────────────────────────────────────────────────┤
//!   │  success / error message (auto-hides after 5 s)                     │
//!   ├─── fields ──────────────────────────────────────────────────────────┤
//!   │  Name *  /  Email *  /  Phone  /  Subject *                         │
//!   │  error slot under each field                                        │
//!   │  Message * (multi-line)                                             │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  [ Send Message ]                                                   │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The request runs on a worker thread; the result comes back over a channel
//! so typing and inline validation keep working while it is in flight.
//!
//! Set `FOLIO_INTAKE_URL` to point at a running `folio-server`.

use std::{
    env, io,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use folio_client::{
    BannerKind, ControllerState, HttpTransport, SubmissionController, SubmitDecision,
};
use folio_contracts::{
    error::{FolioError, FolioResult},
    field::FieldName,
    response::IntakeResponse,
};
use folio_core::SubmitTransport;

const DEFAULT_INTAKE_URL: &str = "http://127.0.0.1:8080/process_contact";

// ── Focus ─────────────────────────────────────────────────────────────────────

/// What keyboard input currently goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Field(FieldName),
    Submit,
}

impl Focus {
    /// Tab order: the five fields, then the submit control.
    const ORDER: [Focus; 6] = [
        Focus::Field(FieldName::Name),
        Focus::Field(FieldName::Email),
        Focus::Field(FieldName::Phone),
        Focus::Field(FieldName::Subject),
        Focus::Field(FieldName::Message),
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    controller: SubmissionController,
    transport: HttpTransport,
    focus: Focus,

    // Result channel for the request in flight, if any.
    pending: Option<Receiver<FolioResult<IntakeResponse>>>,

    // Controller misuse is a bug; surface it instead of hiding it.
    internal_error: Option<String>,
}

impl App {
    fn new(transport: HttpTransport) -> Self {
        Self {
            controller: SubmissionController::new(),
            transport,
            focus: Focus::Field(FieldName::Name),
            pending: None,
            internal_error: None,
        }
    }

    /// Move focus, validating the field being left.
    fn move_focus(&mut self, to: Focus) {
        if let Focus::Field(field) = self.focus {
            self.controller.on_blur(field);
        }
        self.focus = to;
    }

    fn push_char(&mut self, field: FieldName, c: char) {
        let mut value = self.controller.value(field).to_string();
        value.push(c);
        self.controller.set_value(field, value);
    }

    fn pop_char(&mut self, field: FieldName) {
        let mut value = self.controller.value(field).to_string();
        if value.pop().is_some() {
            self.controller.set_value(field, value);
        }
    }

    /// Validate and, if the form is clean, start the request on a worker.
    fn submit(&mut self) {
        if let Focus::Field(field) = self.focus {
            self.controller.on_blur(field);
        }
        match self.controller.begin_submit() {
            SubmitDecision::Dispatch(form) => {
                let (tx, rx) = mpsc::channel();
                let transport = self.transport.clone();
                thread::spawn(move || {
                    // The receiver may be gone if the user quit mid-request.
                    let _ = tx.send(transport.submit(&form));
                });
                self.pending = Some(rx);
            }
            SubmitDecision::Blocked(errors) => {
                if let Some(first) = errors.fields().first() {
                    self.focus = Focus::Field(*first);
                }
            }
            SubmitDecision::Busy => {}
        }
    }

    /// Apply a finished request, if one has come back.
    fn poll_pending(&mut self, now: Instant) {
        let Some(rx) = &self.pending else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(FolioError::Transport {
                reason: "submit worker exited without a result".to_string(),
            }),
        };
        self.pending = None;
        if let Err(e) = self.controller.complete_submit(result, now) {
            self.internal_error = Some(e.to_string());
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit.  Plain letters are form input, so quitting needs Ctrl.
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return false,

            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),

            KeyCode::Esc => {
                self.controller.dismiss_success();
                self.controller.dismiss_error();
            }

            // Ctrl-S submits from anywhere.
            KeyCode::Char('s') if ctrl => self.submit(),

            KeyCode::Enter => match self.focus {
                Focus::Submit => self.submit(),
                Focus::Field(FieldName::Message) => self.push_char(FieldName::Message, '\n'),
                Focus::Field(_) => self.move_focus(self.focus.next()),
            },

            KeyCode::Backspace => {
                if let Focus::Field(field) = self.focus {
                    self.pop_char(field);
                }
            }

            KeyCode::Char(c) if !ctrl => {
                if let Focus::Field(field) = self.focus {
                    self.push_char(field, c);
                }
            }

            _ => {}
        }
        true
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let mut constraints = vec![
        Constraint::Length(3), // header
        Constraint::Length(3), // banner
    ];
    for field in FieldName::ALL {
        if field == FieldName::Message {
            constraints.push(Constraint::Min(5));
        } else {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1)); // error slot
    }
    constraints.push(Constraint::Length(3)); // submit control
    constraints.push(Constraint::Length(3)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(full);

    render_header(f, chunks[0], app);
    render_banner(f, chunks[1], app);

    for (i, field) in FieldName::ALL.into_iter().enumerate() {
        let input_area = chunks[2 + i * 2];
        let error_area = chunks[3 + i * 2];
        render_field(f, input_area, app, field);
        render_error_slot(f, error_area, app, field);
    }

    let after_fields = 2 + FieldName::ALL.len() * 2;
    render_submit(f, chunks[after_fields], app);
    render_footer(f, chunks[after_fields + 1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let (state_label, state_color) = match app.controller.state() {
        ControllerState::Submitting => ("sending", Color::Yellow),
        ControllerState::Success => ("sent", Color::Green),
        ControllerState::Failed => ("failed", Color::Red),
        ControllerState::Idle | ControllerState::Validating => ("ready", Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled("Contact    ", title_style),
        Span::styled(app.transport.url().to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw("    "),
        Span::styled(format!("state: {}", state_label), Style::default().fg(state_color)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_banner(f: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    // An error banner takes the row over a success banner.
    let banner = app
        .controller
        .error_banner()
        .or_else(|| app.controller.success_banner());

    let (text, color) = match banner {
        Some(banner) => {
            let color = match banner.kind {
                BannerKind::Success => Color::Green,
                BannerKind::Error => Color::Red,
            };
            let secs = banner.remaining(now).as_secs() + 1;
            (format!("{}  ({}s, Esc to dismiss)", banner.message, secs), color)
        }
        None => (String::new(), Color::DarkGray),
    };

    let paragraph = Paragraph::new(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(paragraph, area);
}

fn render_field(f: &mut Frame, area: Rect, app: &App, field: FieldName) {
    let focused = app.focus == Focus::Field(field);
    let border_color = if app.controller.is_invalid(field) {
        Color::Red
    } else if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let title = if field.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    };

    let value = app.controller.value(field);
    let lines: Vec<Line> = value.split('\n').map(|l| Line::raw(l.to_string())).collect();
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(paragraph, area);

    if focused {
        let (row, col) = cursor_offset(value);
        let x = area.x + 1 + col.min(area.width.saturating_sub(3));
        let y = area.y + 1 + row.min(area.height.saturating_sub(3));
        f.set_cursor_position((x, y));
    }
}

fn render_error_slot(f: &mut Frame, area: Rect, app: &App, field: FieldName) {
    let text = app.controller.field_error(field).unwrap_or("");
    let slot = Paragraph::new(Span::styled(
        format!("  {}", text),
        Style::default().fg(Color::Red),
    ));
    f.render_widget(slot, area);
}

fn render_submit(f: &mut Frame, area: Rect, app: &App) {
    let control = app.controller.submit_control();
    let focused = app.focus == Focus::Submit;

    let style = if !control.is_enabled() {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let button = Paragraph::new(Span::styled(format!("[ {} ]", control.label()), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(button, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let mut spans: Vec<Span> = vec![
        Span::styled(" [Tab/↑↓] ", key),
        Span::raw("Move  "),
        Span::styled("[Enter] ", key),
        Span::raw("Next / Send  "),
        Span::styled("[Ctrl-S] ", key),
        Span::raw("Send  "),
        Span::styled("[Esc] ", key),
        Span::raw("Dismiss  "),
        Span::styled("[Ctrl-Q] ", key),
        Span::raw("Quit"),
    ];

    if let Some(e) = &app.internal_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(e.clone(), Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// (row, column) of the end of `value`, counting chars.
fn cursor_offset(value: &str) -> (u16, u16) {
    let row = value.matches('\n').count();
    let col = value.rsplit('\n').next().map_or(0, |l| l.chars().count());
    (
        u16::try_from(row).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}

fn intake_url() -> String {
    env::var("FOLIO_INTAKE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_INTAKE_URL.to_string())
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(HttpTransport::new(intake_url()));

    // Short ticks while a request is out, so the result shows promptly.
    const BUSY_TICK_MS: u64 = 50;
    const IDLE_TICK_MS: u64 = 200;

    loop {
        let now = Instant::now();
        app.poll_pending(now);
        app.controller.tick(now);

        terminal.draw(|f| ui(f, &app))?;

        let timeout = if app.pending.is_some() {
            Duration::from_millis(BUSY_TICK_MS)
        } else {
            Duration::from_millis(IDLE_TICK_MS)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too.
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
