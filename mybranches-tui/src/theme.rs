use mybranches_core::config::{NamedColor, ThemeColor, ThemeConfig};
use ratatui::style::{Color, Style};

/// What a piece of text is for; the theme decides how it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Cursor marker, pattern and branch names being acted on
    Selected,
    /// The "(current)" badge
    Current,
    HelpKey,
    HelpText,
    Spinner,
    Error,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub selected: Color,
    pub current: Color,
    pub help_key: Color,
    pub help_text: Color,
    pub spinner: Color,
    pub error: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            selected: to_ratatui_color(&config.selected),
            current: to_ratatui_color(&config.current),
            help_key: to_ratatui_color(&config.help_key),
            help_text: to_ratatui_color(&config.help_text),
            spinner: to_ratatui_color(&config.spinner),
            error: to_ratatui_color(&config.error),
        }
    }

    pub fn color(&self, role: Role) -> Color {
        match role {
            Role::Selected => self.selected,
            Role::Current => self.current,
            Role::HelpKey => self.help_key,
            Role::HelpText => self.help_text,
            Role::Spinner => self.spinner,
            Role::Error => self.error,
        }
    }

    pub fn style(&self, role: Role) -> Style {
        Style::default().fg(self.color(role))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
            NamedColor::DarkGray => Color::DarkGray,
        },
    }
}
