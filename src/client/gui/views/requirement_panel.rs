use crate::client::gui::views::style::{
    card_appearance, input_appearance, ACCENT_COLOR, BOLD_FONT, ERROR_COLOR, INPUT_BG,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::client::gui::widgets::alert::{self, AlertLevel};
use crate::client::models::app_state::StudioState;
use crate::client::models::messages::Message;
use crate::client::models::session::Workspace;
use crate::client::services::workflow::Phase;
use crate::common::models::RequirementVerdict;
use iced::widget::{Button, Column, Container, PickList, Row, Scrollable, Text, TextInput};
use iced::{Alignment, Element, Length};

pub fn view<'a>(state: &'a StudioState, ws: &'a Workspace) -> Element<'a, Message> {
    let title = Text::new("Requirement Validator (INCOSE)").font(BOLD_FONT).size(22).style(TEXT_PRIMARY);

    let model_row = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("AI Model:").font(BOLD_FONT).size(14))
        .push(
            PickList::new(
                ws.catalog.models(),
                ws.catalog.find(&state.requirement_model).cloned(),
                Message::RequirementModelSelected,
            )
            .placeholder(state.requirement_model.as_str())
            .width(Length::Fill),
        );

    let requirement_input = Container::new(
        TextInput::new(
            "Enter a system requirement to validate against INCOSE standards...",
            &state.requirement,
        )
        .on_input(Message::RequirementChanged)
        .on_submit(Message::SubmitRequirement)
        .width(Length::Fill)
        .padding(12)
        .size(14),
    )
    .style(iced::theme::Container::Custom(Box::new(input_appearance)));

    let mut submit = Button::new(Text::new("Validate Requirement").font(BOLD_FONT).size(14))
        .padding(12)
        .style(iced::theme::Button::Secondary);
    if state.can_submit_requirement() {
        submit = submit.on_press(Message::SubmitRequirement).style(iced::theme::Button::Primary);
    }

    let mut content = Column::new()
        .spacing(14)
        .padding(24)
        .push(title)
        .push(model_row)
        .push(requirement_input)
        .push(submit);

    match ws.requirements.phase() {
        Phase::Idle => {}
        Phase::Pending => {
            content = content.push(alert::view("Evaluating requirement...", AlertLevel::Info));
        }
        Phase::Failed => {
            if let Some(message) = ws.requirements.error_message() {
                content = content.push(alert::view(message, AlertLevel::Error));
            }
        }
        Phase::Succeeded => {
            if let Some(verdict) = ws.requirements.result() {
                content = content.push(verdict_view(verdict));
            }
        }
    }

    Container::new(content)
        .width(Length::FillPortion(1))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn verdict_view(verdict: &RequirementVerdict) -> Element<'_, Message> {
    let (heading, color) = if verdict.verdict.is_valid() {
        ("✓ Valid Requirement", ACCENT_COLOR)
    } else {
        ("✗ Invalid Requirement", ERROR_COLOR)
    };

    let analysis = Container::new(Scrollable::new(Text::new(verdict.rationale.as_str()).size(14)))
        .width(Length::Fill)
        .max_height(320.0)
        .padding(10)
        .style(iced::theme::Container::Custom(Box::new(|_: &iced::Theme| {
            iced::widget::container::Appearance {
                background: Some(iced::Background::Color(INPUT_BG)),
                text_color: Some(TEXT_PRIMARY),
                border: iced::Border {
                    radius: 4.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })));

    Column::new()
        .spacing(10)
        .push(Text::new(heading).font(BOLD_FONT).size(18).style(color))
        .push(Text::new("Analysis:").size(14).style(TEXT_SECONDARY))
        .push(analysis)
        .into()
}
