use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Horizontal nav bar with the active section highlighted.
///
/// Highlighting follows the authoritative index, which the controller
/// updates at transition start, so the bar reacts instantly even while
/// the deck is still sliding.
pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let active = app.nav.authoritative_index();
        let mut spans: Vec<Span> = Vec::with_capacity(app.sections.len() * 2 + 1);
        let mut used: usize = 0;

        for (i, section) in app.sections.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, section.label);
            used += label.width();
            let style = if i == active {
                Style::default()
                    .fg(app.theme.bg0)
                    .bg(app.theme.active_section)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(app.theme.inactive_section)
                    .bg(app.theme.bg1)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::styled(" ", Style::default().bg(app.theme.bg1)));
            used += 1;
        }

        let padding = (area.width as usize).saturating_sub(used);
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(app.theme.bg1),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
