use crossterm::cursor::MoveUp;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::Stdout;

pub enum ThemeColor {
    Main,
    Second,
    Success,
    Warn,
    Error,
}

impl From<ThemeColor> for Color {
    fn from(value: ThemeColor) -> Self {
        match value {
            ThemeColor::Main => Color::White,
            ThemeColor::Second => Color::DarkGrey,
            ThemeColor::Success => Color::Green,
            ThemeColor::Warn => Color::Yellow,
            ThemeColor::Error => Color::Red,
        }
    }
}

pub fn colored_println(stdout: &mut Stdout, color: ThemeColor, content: &str) {
    let _ = execute!(
        stdout,
        SetForegroundColor(color.into()),
        Print(content),
        Print("\n"),
        ResetColor,
    );
}

/// Erase the previous line so transient progress lines can be redrawn in place.
pub fn clean_one_line(stdout: &mut Stdout) {
    let _ = execute!(stdout, MoveUp(1), Clear(ClearType::CurrentLine));
}
