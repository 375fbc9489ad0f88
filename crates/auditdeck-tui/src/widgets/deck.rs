use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use auditdeck_core::api::JobStatus;

use crate::app::{App, Section, SectionKind};

/// Renders the horizontally paged deck at its current fractional offset.
///
/// At most two sections are ever visible: the one under the offset and,
/// while sliding, a slice of its neighbor. The split column is derived
/// from the fractional part of the offset so the slide is smooth.
pub struct DeckWidget;

impl DeckWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.width == 0 || area.height == 0 || app.sections.is_empty() {
            return;
        }

        let width = app.nav.geometry().section_width().max(1.0);
        let offset = app.nav.offset();
        let left_index = ((offset / width).floor() as usize).min(app.sections.len() - 1);
        let rem = (offset - left_index as f64 * width).clamp(0.0, width);

        // Columns of the left section still on screen
        let left_cols = ((1.0 - rem / width) * area.width as f64).round() as u16;

        if left_cols >= area.width || left_index + 1 >= app.sections.len() {
            Self::render_section(frame, area, app, &app.sections[left_index]);
            return;
        }
        if left_cols == 0 {
            Self::render_section(frame, area, app, &app.sections[left_index + 1]);
            return;
        }

        let left_area = Rect::new(area.x, area.y, left_cols, area.height);
        let right_area = Rect::new(
            area.x + left_cols,
            area.y,
            area.width - left_cols,
            area.height,
        );
        Self::render_section(frame, left_area, app, &app.sections[left_index]);
        Self::render_section(frame, right_area, app, &app.sections[left_index + 1]);
    }

    fn render_section(frame: &mut Frame, area: Rect, app: &App, section: &Section) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.bg2))
            .title(Span::styled(
                format!(" {} ", section.label),
                Style::default()
                    .fg(app.theme.fg0)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match section.kind {
            SectionKind::Overview => Self::render_overview(frame, inner, app),
            SectionKind::Datasets => Self::render_datasets(frame, inner, app),
            SectionKind::Models => Self::render_models(frame, inner, app),
            SectionKind::Audits => Self::render_audits(frame, inner, app),
            SectionKind::Reports => Self::render_reports(frame, inner, app),
        }
    }

    fn render_overview(frame: &mut Frame, area: Rect, app: &App) {
        let running = app.jobs.iter().filter(|j| !j.status.is_terminal()).count();
        let lines = vec![
            Line::from(Span::styled(
                "auditdeck",
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Audit your models for fairness, robustness and drift."),
            Line::from(""),
            Line::from(format!(
                "{} datasets · {} models · {} audits ({} running)",
                app.datasets.len(),
                app.models.len(),
                app.jobs.len(),
                running
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Scroll, swipe or use ←/→ to move between sections.",
                Style::default().fg(app.theme.grey1),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(app.theme.fg1))
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_datasets(frame: &mut Frame, area: Rect, app: &App) {
        let header = Row::new(["Name", "Format", "Size", "Target"])
            .style(Style::default().fg(app.theme.yellow));
        let rows: Vec<Row> = app
            .datasets
            .iter()
            .map(|d| {
                Row::new(vec![
                    Cell::from(d.name.clone()),
                    Cell::from(d.file_format.clone()),
                    Cell::from(human_size(d.size_bytes)),
                    Cell::from(d.target_column.clone()),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .style(Style::default().fg(app.theme.fg1));
        frame.render_widget(table, area);
    }

    fn render_models(frame: &mut Frame, area: Rect, app: &App) {
        let header = Row::new(["Name", "Framework", "Task", "Size"])
            .style(Style::default().fg(app.theme.yellow));
        let rows: Vec<Row> = app
            .models
            .iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(m.name.clone()),
                    Cell::from(m.framework.clone()),
                    Cell::from(m.task_type.clone().unwrap_or_else(|| "-".into())),
                    Cell::from(human_size(m.size_bytes)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
            ],
        )
        .header(header)
        .style(Style::default().fg(app.theme.fg1));
        frame.render_widget(table, area);
    }

    fn render_audits(frame: &mut Frame, area: Rect, app: &App) {
        let mut lines = Vec::new();
        for job in &app.jobs {
            let (status, color) = match job.status {
                JobStatus::Created => ("created", app.theme.grey1),
                JobStatus::Running => ("running", app.theme.warning),
                JobStatus::Completed => ("completed", app.theme.success),
                JobStatus::Failed => ("failed", app.theme.error),
            };
            let step = job.step.as_deref().unwrap_or("-");
            lines.push(Line::from(vec![
                Span::styled(format!("{:>9}  ", status), Style::default().fg(color)),
                Span::styled(
                    format!("job {}  ", short_id(&job.id)),
                    Style::default().fg(app.theme.fg1),
                ),
                Span::styled(format!("step: {}", step), Style::default().fg(app.theme.grey1)),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No audit jobs yet.",
                Style::default().fg(app.theme.grey1),
            )));
        }

        let gauge_height = 3u16;
        let list_area = Rect::new(
            area.x,
            area.y,
            area.width,
            area.height.saturating_sub(gauge_height),
        );
        frame.render_widget(Paragraph::new(lines), list_area);

        if let Some(job) = app.jobs.iter().find(|j| j.status == JobStatus::Running) {
            if area.height > gauge_height {
                let gauge_area =
                    Rect::new(area.x, area.y + area.height - gauge_height, area.width, gauge_height);
                let ratio = job.progress.unwrap_or(0.0).clamp(0.0, 1.0);
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title(" progress "))
                    .gauge_style(Style::default().fg(app.theme.accent).bg(app.theme.bg2))
                    .ratio(ratio);
                frame.render_widget(gauge, gauge_area);
            }
        }
    }

    fn render_reports(frame: &mut Frame, area: Rect, app: &App) {
        let mut lines = vec![Line::from(Span::styled(
            "Completed audits with a report ready:",
            Style::default().fg(app.theme.fg1),
        ))];
        lines.push(Line::from(""));
        let mut any = false;
        for job in app.jobs.iter().filter(|j| j.status == JobStatus::Completed) {
            any = true;
            lines.push(Line::from(Span::styled(
                format!("  report_{}.pdf", short_id(&job.id)),
                Style::default().fg(app.theme.green),
            )));
        }
        if !any {
            lines.push(Line::from(Span::styled(
                "  none yet — reports appear here when an audit finishes",
                Style::default().fg(app.theme.grey1),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(4_812_339), "4.6 MiB");
    }
}
