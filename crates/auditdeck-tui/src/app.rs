use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use auditdeck_core::api::{AuditJob, Dataset, ModelEntry, ProgressEvent};
use auditdeck_core::nav::{
    DragTracker, NavIntent, NavigationController, ResizeReconciler, SectionGeometry,
    WheelAccumulator, WheelResponse,
};
use auditdeck_core::AppConfig;

use crate::input::Action;
use crate::theme::Theme;

/// Accumulator delta credited per vertical wheel notch
const WHEEL_NOTCH_DELTA: f64 = 20.0;
/// Columns scrolled per horizontal wheel notch (pass-through)
const HWHEEL_NOTCH_COLS: f64 = 3.0;
/// Approximate pixel size of one terminal cell; drag gestures are scaled
/// to pixels so the swipe thresholds mean the same thing they would in a
/// pointer environment
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

/// What a deck section renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Overview,
    Datasets,
    Models,
    Audits,
    Reports,
}

/// One full-viewport page of the deck
#[derive(Debug, Clone)]
pub struct Section {
    pub label: &'static str,
    pub kind: SectionKind,
}

fn deck_sections() -> Vec<Section> {
    vec![
        Section { label: "Overview", kind: SectionKind::Overview },
        Section { label: "Datasets", kind: SectionKind::Datasets },
        Section { label: "Models", kind: SectionKind::Models },
        Section { label: "Audits", kind: SectionKind::Audits },
        Section { label: "Reports", kind: SectionKind::Reports },
    ]
}

/// Application state: the deck, its navigation engine, and audit data
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub sections: Vec<Section>,
    pub nav: NavigationController,
    wheel: WheelAccumulator,
    drag: DragTracker,
    reconciler: ResizeReconciler,
    pub datasets: Vec<Dataset>,
    pub models: Vec<ModelEntry>,
    pub jobs: Vec<AuditJob>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, theme: Theme, viewport_width: u16) -> Self {
        let sections = deck_sections();
        let geometry =
            SectionGeometry::measure(viewport_width as f64, None, sections.len());
        let nav = NavigationController::new(geometry, &config.nav);
        let wheel = WheelAccumulator::new(&config.nav);
        let drag = DragTracker::new(&config.nav);
        let reconciler = ResizeReconciler::new(&config.nav);

        Self {
            config,
            theme,
            sections,
            nav,
            wheel,
            drag,
            reconciler,
            datasets: Vec::new(),
            models: Vec::new(),
            jobs: Vec::new(),
            should_quit: false,
        }
    }

    /// Replace the audit data shown by the section panels
    pub fn set_data(
        &mut self,
        datasets: Vec<Dataset>,
        models: Vec<ModelEntry>,
        jobs: Vec<AuditJob>,
    ) {
        self.datasets = datasets;
        self.models = models;
        self.jobs = jobs;
    }

    /// Fold a progress frame into the matching job row
    pub fn apply_progress(&mut self, event: ProgressEvent) {
        if let Some(job) = self.jobs.iter_mut().find(|j| j.id == event.job_id) {
            job.status = event.status;
            job.step = event.step;
            job.progress = event.progress;
        }
    }

    /// First job that is still running, if any
    pub fn running_job(&self) -> Option<&AuditJob> {
        self.jobs.iter().find(|j| !j.status.is_terminal())
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextSection => self.nav.apply(NavIntent::Advance(1), now),
            Action::PrevSection => self.nav.apply(NavIntent::Advance(-1), now),
            Action::JumpToSection(index) => self.nav.apply(NavIntent::JumpTo(index), now),
            Action::FirstSection => self.nav.apply(NavIntent::JumpTo(0), now),
            Action::LastSection => {
                self.nav
                    .apply(NavIntent::JumpTo(self.sections.len() - 1), now)
            }
            Action::None => {}
        }
    }

    /// Route mouse input into the wheel accumulator or the drag tracker
    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.wheel.on_wheel(0.0, WHEEL_NOTCH_DELTA, now);
            }
            MouseEventKind::ScrollUp => {
                self.wheel.on_wheel(0.0, -WHEEL_NOTCH_DELTA, now);
            }
            MouseEventKind::ScrollRight => self.forward_hwheel(HWHEEL_NOTCH_COLS, now),
            MouseEventKind::ScrollLeft => self.forward_hwheel(-HWHEEL_NOTCH_COLS, now),
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag
                    .on_start(cell_x(mouse.column), cell_y(mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // The deck has no native vertical scroll to suppress; the
                // classifier still tracks the motion for the release.
                self.drag.on_move(cell_x(mouse.column), cell_y(mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(intent) = self.drag.on_end(cell_x(mouse.column), cell_y(mouse.row))
                {
                    self.nav.apply(intent, now);
                }
            }
            _ => {}
        }
    }

    pub fn on_resize(&mut self, width: u16, now: Instant) {
        self.reconciler.on_resize(width as f64, now);
    }

    /// Advance all time-based nav state; call once per loop iteration
    pub fn tick(&mut self, now: Instant) {
        if let Some(intent) = self.wheel.poll(now) {
            if self.nav.wheel_suppressed(now) {
                tracing::trace!(?intent, "wheel intent suppressed during cooldown");
            } else {
                self.nav.apply(intent, now);
            }
        }
        self.reconciler.poll(now, &mut self.nav);
        self.nav.update(now);
    }

    /// Whether the next poll should run at the animation tick rate
    pub fn needs_fast_update(&self) -> bool {
        self.nav.needs_update() || self.wheel.is_pending() || self.reconciler.is_pending()
    }

    fn forward_hwheel(&mut self, delta_cols: f64, now: Instant) {
        if let WheelResponse::PassThrough(dx) = self.wheel.on_wheel(delta_cols, 0.0, now) {
            self.nav.scroll_horizontal(dx, now);
        }
    }
}

#[inline]
fn cell_x(column: u16) -> f64 {
    column as f64 * CELL_WIDTH_PX
}

#[inline]
fn cell_y(row: u16) -> f64 {
    row as f64 * CELL_HEIGHT_PX
}
