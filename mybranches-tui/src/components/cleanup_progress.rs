use crate::theme::{Role, Theme};
use mybranches_core::cleanup::{CleanupState, stage_label};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

pub fn draw(f: &mut Frame, area: Rect, state: &CleanupState, theme: &Theme) {
    let line = if let Some(error) = state.error() {
        Line::styled(format!("Something went wrong: {error}"), theme.style(Role::Error))
    } else {
        match stage_label(state.stage()) {
            Err(e) => Line::styled(e.to_string(), theme.style(Role::Error)),
            Ok(label) if state.stage().is_done() => Line::from(format!("{label}.")),
            Ok(label) => Line::from(vec![
                Span::styled(spinner(state.spinner_frame()), theme.style(Role::Spinner)),
                Span::raw(format!(" {label}... ")),
                Span::styled("(q to quit)", theme.style(Role::HelpText)),
            ]),
        }
    };
    f.render_widget(
        Paragraph::new(vec![Line::default(), line]).wrap(Wrap { trim: false }),
        area,
    );
}
