use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use auditdeck_core::api::{AuditService, StaticAuditService};
use auditdeck_core::AppConfig;
use auditdeck_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{DeckWidget, NavBarWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("auditdeck")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config).await;

    // Restore terminal even when the loop errored
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
) -> Result<()> {
    // The demo deck runs against the in-memory audit service; a deployment
    // wires a real backend behind the same trait.
    let service = StaticAuditService::with_demo_data();

    let size = terminal.size()?;
    let mut app = App::new(config, Theme::default(), size.width);
    app.set_data(
        service.list_datasets().await?,
        service.list_models().await?,
        service.list_jobs().await?,
    );

    let event_handler = EventHandler::new(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);
    let progress_interval = Duration::from_secs(app.config.api.poll_interval_secs.max(1));
    let mut last_progress_poll = Instant::now();

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| draw(frame, &app))?;

        // Use the fast tick rate while the deck is animating or debouncing
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Mouse(mouse) => app.on_mouse(mouse, Instant::now()),
                AppEvent::Resize(width, _) => app.on_resize(width, Instant::now()),
                AppEvent::Tick => {
                    if last_progress_poll.elapsed() >= progress_interval {
                        last_progress_poll = Instant::now();
                        poll_progress(&service, &mut app).await;
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Polling fallback for job progress; a streaming backend pushes the same
/// frames instead.
async fn poll_progress(service: &StaticAuditService, app: &mut App) {
    let Some(job) = app.running_job() else {
        return;
    };
    let id = job.id;
    match service.next_progress(id).await {
        Ok(event) => app.apply_progress(event),
        Err(e) => tracing::warn!(%id, error = %e, "progress poll failed"),
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let constraints = if app.config.ui.show_status_bar {
        vec![
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ]
    } else {
        vec![Constraint::Length(1), Constraint::Min(1)]
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    NavBarWidget::render(frame, layout[0], app);
    DeckWidget::render(frame, layout[1], app);
    if app.config.ui.show_status_bar {
        StatusBarWidget::render(frame, layout[2], app);
    }
}
