use crate::client::gui::views::style::{bg_main_appearance, BOLD_FONT, INPUT_BG, TEXT_PRIMARY};
use crate::client::gui::views::{diagram_panel, requirement_panel};
use crate::client::models::app_state::StudioState;
use crate::client::models::messages::Message;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Alignment, Element, Length};

pub fn view(state: &StudioState) -> Element<'_, Message> {
    let Some(ws) = state.gate.workspace() else {
        return Text::new("Session closed").into();
    };

    let header = Container::new(
        Row::new()
            .align_items(Alignment::Center)
            .push(
                Text::new("UML Generator & Requirement Validator")
                    .font(BOLD_FONT)
                    .size(26)
                    .style(TEXT_PRIMARY),
            )
            .push(Space::new(Length::Fill, Length::Fixed(0.0)))
            .push(
                Button::new(Text::new("Logout").size(14))
                    .on_press(Message::Logout)
                    .style(iced::theme::Button::Destructive)
                    .padding([8, 16]),
            ),
    )
    .width(Length::Fill)
    .padding([16, 24])
    .style(iced::theme::Container::Custom(Box::new(|_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(INPUT_BG)),
            text_color: Some(TEXT_PRIMARY),
            ..Default::default()
        }
    })));

    let panels = Row::new()
        .spacing(24)
        .padding(24)
        .push(diagram_panel::view(state, ws))
        .push(requirement_panel::view(state, ws));

    Container::new(
        Column::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(header)
            .push(Scrollable::new(panels).height(Length::Fill)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
    .into()
}
