use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let index = app.nav.authoritative_index();
        let label = app
            .sections
            .get(index)
            .map(|s| s.label)
            .unwrap_or("?");
        let motion = if app.nav.is_transitioning() { " ~" } else { "" };

        let status_text = format!(
            " {}/{} {}{}",
            index + 1,
            app.sections.len(),
            label,
            motion
        );
        let help_hint = " q:quit ←/→:sections 1-5:jump g/G:ends ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.len() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(app.theme.fg0).bg(app.theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(app.theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(app.theme.grey1).bg(app.theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
