use crate::client::gui::views::style::{
    bg_main_appearance, card_appearance, input_appearance, BOLD_FONT, ERROR_COLOR, TEXT_PRIMARY,
    TEXT_SECONDARY,
};
use crate::client::models::app_state::StudioState;
use crate::client::models::messages::Message;
use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

pub fn view(state: &StudioState) -> Element<'_, Message> {
    let submit_enabled = !state.username.is_empty() && !state.password.is_empty();
    let on_submit = if submit_enabled { Message::SubmitLogin } else { Message::None };

    let title = Text::new("UML Generator & Requirement Validator")
        .size(28)
        .font(BOLD_FONT)
        .style(TEXT_PRIMARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let subtitle = Text::new("Sign in to continue")
        .size(16)
        .style(TEXT_SECONDARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let username_field = Column::new()
        .spacing(8)
        .push(Text::new("Username").size(14).style(TEXT_SECONDARY))
        .push(
            Container::new(
                TextInput::new("Enter your username", &state.username)
                    .on_input(Message::UsernameChanged)
                    .on_submit(on_submit.clone())
                    .width(Length::Fill)
                    .padding(12)
                    .size(14),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        );

    let password_field = Column::new()
        .spacing(8)
        .push(Text::new("Password").size(14).style(TEXT_SECONDARY))
        .push(
            Container::new(
                Row::new()
                    .align_items(Alignment::Center)
                    .push(
                        TextInput::new("Enter your password", &state.password)
                            .on_input(Message::PasswordChanged)
                            .on_submit(on_submit)
                            .secure(!state.show_password)
                            .width(Length::Fill)
                            .padding(12)
                            .size(14),
                    )
                    .push(
                        Button::new(Text::new(if state.show_password { "Hide" } else { "Show" }).size(12))
                            .on_press(Message::ToggleShowPassword)
                            .style(iced::theme::Button::Text)
                            .padding([8, 12]),
                    ),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        );

    let error: Element<Message> = match &state.login_error {
        Some(message) => Text::new(message.as_str()).size(14).style(ERROR_COLOR).into(),
        None => Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let submit_label = Text::new("Login").font(BOLD_FONT).size(16).style(TEXT_PRIMARY);
    let mut submit_button = Button::new(Container::new(submit_label).width(Length::Fill).center_x())
        .width(Length::Fill)
        .padding(16)
        .style(iced::theme::Button::Secondary);
    if submit_enabled {
        submit_button = submit_button
            .on_press(Message::SubmitLogin)
            .style(iced::theme::Button::Primary);
    }

    let card_content = Column::new()
        .width(Length::Fixed(420.0))
        .spacing(20)
        .padding(32)
        .align_items(Alignment::Center)
        .push(
            Column::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(title)
                .push(subtitle),
        )
        .push(username_field)
        .push(password_field)
        .push(error)
        .push(submit_button);

    let card = Container::new(card_content)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)));

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}
