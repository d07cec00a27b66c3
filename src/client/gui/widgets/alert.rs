// Inline alert line used for workflow errors and soft warnings
use crate::client::gui::views::style::{ERROR_COLOR, TEXT_SECONDARY, WARNING_COLOR};
use crate::client::models::messages::Message;
use iced::widget::{Row, Text};
use iced::{Alignment, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Error,
    Warning,
    Info,
}

impl AlertLevel {
    fn color(&self) -> iced::Color {
        match self {
            AlertLevel::Error => ERROR_COLOR,
            AlertLevel::Warning => WARNING_COLOR,
            AlertLevel::Info => TEXT_SECONDARY,
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            AlertLevel::Error => "✗",
            AlertLevel::Warning => "!",
            AlertLevel::Info => "…",
        }
    }
}

pub fn view(msg: &str, level: AlertLevel) -> Element<'_, Message> {
    Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new(level.marker()).size(14).style(level.color()))
        .push(Text::new(msg).size(14).style(level.color()))
        .into()
}
