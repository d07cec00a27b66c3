use crate::client::gui::views::style::{
    card_appearance, diagram_surface_appearance, input_appearance, BOLD_FONT, TEXT_PRIMARY,
    TEXT_SECONDARY,
};
use crate::client::gui::widgets::alert::{self, AlertLevel};
use crate::client::models::app_state::StudioState;
use crate::client::models::messages::Message;
use crate::client::models::session::Workspace;
use crate::client::services::workflow::Phase;
use crate::common::models::DiagramKind;
use iced::widget::svg::Handle;
use iced::widget::{Button, Column, Container, PickList, Row, Scrollable, Svg, Text, TextInput};
use iced::{Alignment, Element, Length};

pub fn view<'a>(state: &'a StudioState, ws: &'a Workspace) -> Element<'a, Message> {
    let title = Text::new("UML Diagram Generator").font(BOLD_FONT).size(22).style(TEXT_PRIMARY);

    let kind_row = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("Diagram Type:").font(BOLD_FONT).size(14))
        .push(
            PickList::new(DiagramKind::all(), Some(state.diagram_kind), Message::DiagramKindSelected)
                .width(Length::Fill),
        );

    let selected_model = ws.catalog.find(&state.diagram_model).cloned();
    let model_row = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("AI Model:").font(BOLD_FONT).size(14))
        .push(
            PickList::new(ws.catalog.models(), selected_model.clone(), Message::DiagramModelSelected)
                .placeholder(state.diagram_model.as_str())
                .width(Length::Fill),
        );
    let model_hint = Text::new(
        selected_model
            .map(|m| match m.provider {
                Some(provider) => format!("{} ({})", m.description, provider),
                None => m.description,
            })
            .unwrap_or_default(),
    )
    .size(12)
    .style(TEXT_SECONDARY);

    let scenario_input = Container::new(
        TextInput::new("Describe your system or scenario...", &state.scenario)
            .on_input(Message::ScenarioChanged)
            .on_submit(Message::SubmitDiagram)
            .width(Length::Fill)
            .padding(12)
            .size(14),
    )
    .style(iced::theme::Container::Custom(Box::new(input_appearance)));

    let mut submit = Button::new(Text::new("Generate UML").font(BOLD_FONT).size(14))
        .padding(12)
        .style(iced::theme::Button::Secondary);
    if state.can_submit_diagram() {
        submit = submit.on_press(Message::SubmitDiagram).style(iced::theme::Button::Primary);
    }

    let mut content = Column::new()
        .spacing(14)
        .padding(24)
        .push(title)
        .push(kind_row)
        .push(model_row)
        .push(model_hint)
        .push(scenario_input)
        .push(submit);

    match ws.diagrams.phase() {
        Phase::Idle => {}
        Phase::Pending => {
            content = content.push(alert::view("Generating UML...", AlertLevel::Info));
        }
        Phase::Failed => {
            if let Some(message) = ws.diagrams.error_message() {
                content = content.push(alert::view(message, AlertLevel::Error));
            }
        }
        Phase::Succeeded => {
            if let Some(warning) = ws.diagrams.result().and_then(|r| r.warning()) {
                content = content.push(alert::view(warning, AlertLevel::Warning));
            }
            content = content.push(result_view(ws));
        }
    }

    Container::new(content)
        .width(Length::FillPortion(1))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn result_view(ws: &Workspace) -> Element<'_, Message> {
    let renderer = &ws.renderer;
    let body: Element<Message> = if let Some(image) = renderer.surface() {
        Scrollable::new(
            Svg::new(Handle::from_memory(image.to_vec()))
                .width(Length::Fill)
                .height(Length::Shrink),
        )
        .height(Length::Fixed(360.0))
        .into()
    } else if let Some(error) = renderer.error() {
        alert::view(error, AlertLevel::Error)
    } else {
        return Column::new().into();
    };

    Column::new()
        .spacing(8)
        .push(Text::new("Visual Diagram:").font(BOLD_FONT).size(16))
        .push(
            Container::new(body)
                .width(Length::Fill)
                .padding(8)
                .style(iced::theme::Container::Custom(Box::new(diagram_surface_appearance))),
        )
        .into()
}
