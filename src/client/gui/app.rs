use crate::client::config::ClientConfig;
use crate::client::models::app_state::{AppState, StudioState};
use crate::client::models::messages::Message;
use crate::client::services::backend::BackendClient;
use crate::client::services::renderer::GraphvizEngine;
use iced::{Application, Command, Element, Theme};
use std::sync::Arc;

/// Startup values handed to the iced application.
pub struct StudioFlags {
    pub config: ClientConfig,
    pub backend: BackendClient,
}

pub struct StudioApp {
    pub state: StudioState,
    pub backend: BackendClient,
}

impl Application for StudioApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = StudioFlags;

    fn new(flags: StudioFlags) -> (Self, Command<Message>) {
        let app = StudioApp {
            state: StudioState::new(Arc::new(GraphvizEngine), &flags.config.default_model),
            backend: flags.backend,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        match self.state.app_state {
            AppState::Login => "UML Studio - Login".to_string(),
            AppState::Studio => "UML Studio".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        self.state.update(message, &self.backend)
    }

    fn view(&self) -> Element<Message> {
        match self.state.app_state {
            AppState::Login => crate::client::gui::views::login::view(&self.state),
            AppState::Studio => crate::client::gui::views::studio::view(&self.state),
        }
    }
}
