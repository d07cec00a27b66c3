use crate::client::models::messages::Message;
use crate::client::models::session::{SessionGate, INVALID_CREDENTIALS};
use crate::client::services::backend::{BackendClient, EvaluateRequirement, GenerateDiagram};
use crate::client::services::catalog::load_catalog;
use crate::client::services::renderer::DotEngine;
use crate::client::services::workflow::{dispatch, Transition};
use crate::common::models::{DiagramKind, DiagramRequest, RequirementRequest};
use iced::Command;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Login,
    Studio,
}

/// Everything the GUI shows: form fields plus the session gate that owns the
/// workflows.
pub struct StudioState {
    pub app_state: AppState,
    pub gate: SessionGate,
    // Login form
    pub username: String,
    pub password: String,
    pub show_password: bool,
    pub login_error: Option<String>,
    // Diagram form
    pub scenario: String,
    pub diagram_kind: DiagramKind,
    pub diagram_model: String,
    // Requirement form
    pub requirement: String,
    pub requirement_model: String,
    default_model: String,
}

impl StudioState {
    pub fn new(engine: Arc<dyn DotEngine>, default_model: &str) -> Self {
        Self {
            app_state: AppState::Login,
            gate: SessionGate::new(engine),
            username: String::new(),
            password: String::new(),
            show_password: false,
            login_error: None,
            scenario: String::new(),
            diagram_kind: DiagramKind::default(),
            diagram_model: default_model.to_string(),
            requirement: String::new(),
            requirement_model: default_model.to_string(),
            default_model: default_model.to_string(),
        }
    }

    pub fn can_submit_diagram(&self) -> bool {
        !self.scenario.trim().is_empty()
            && self
                .gate
                .workspace()
                .map(|ws| !ws.diagrams.is_pending())
                .unwrap_or(false)
    }

    pub fn can_submit_requirement(&self) -> bool {
        !self.requirement.trim().is_empty()
            && self
                .gate
                .workspace()
                .map(|ws| !ws.requirements.is_pending())
                .unwrap_or(false)
    }

    pub fn update(&mut self, message: Message, backend: &BackendClient) -> Command<Message> {
        match message {
            Message::None => {}
            Message::UsernameChanged(username) => {
                self.username = username;
            }
            Message::PasswordChanged(password) => {
                self.password = password;
            }
            Message::ToggleShowPassword => {
                self.show_password = !self.show_password;
            }
            Message::SubmitLogin => {
                if !self.gate.attempt_login(&self.username, &self.password) {
                    self.login_error = Some(INVALID_CREDENTIALS.to_string());
                    return Command::none();
                }
                self.login_error = None;
                self.password.clear();
                self.app_state = AppState::Studio;

                // Catalog loads in the background once per unlock
                if let Some(ws) = self.gate.workspace_mut() {
                    if ws.begin_catalog_load() {
                        let session = ws.session();
                        let backend = backend.clone();
                        return Command::perform(load_catalog(backend), move |outcome| {
                            Message::CatalogLoaded { session, outcome }
                        });
                    }
                }
            }
            Message::Logout => {
                self.gate.logout();
                self.app_state = AppState::Login;
                self.password.clear();
                self.scenario.clear();
                self.requirement.clear();
                self.diagram_kind = DiagramKind::default();
                self.diagram_model = self.default_model.clone();
                self.requirement_model = self.default_model.clone();
            }
            Message::CatalogLoaded { session, outcome } => {
                match self.gate.workspace_mut() {
                    Some(ws) => {
                        ws.finish_catalog_load(session, outcome);
                    }
                    None => info!("Catalog response arrived after logout, ignored"),
                }
            }
            Message::ScenarioChanged(text) => {
                self.scenario = text;
            }
            Message::DiagramKindSelected(kind) => {
                self.diagram_kind = kind;
            }
            Message::DiagramModelSelected(model) => {
                self.diagram_model = model.id;
            }
            Message::SubmitDiagram => {
                if !self.can_submit_diagram() {
                    return Command::none();
                }
                let request = DiagramRequest {
                    scenario_text: self.scenario.trim().to_string(),
                    diagram_kind: self.diagram_kind,
                    model_id: self.diagram_model.clone(),
                };
                if let Some(ws) = self.gate.workspace_mut() {
                    let ticket = ws.submit_diagram();
                    info!("Generating {} diagram with {}", request.diagram_kind.as_str(), request.model_id);
                    return Command::perform(
                        dispatch::<GenerateDiagram>(backend.clone(), ticket, request),
                        |(ticket, outcome)| Message::DiagramFinished { ticket, outcome },
                    );
                }
            }
            Message::DiagramFinished { ticket, outcome } => {
                match self.gate.workspace_mut() {
                    Some(ws) => {
                        if ws.finish_diagram(ticket, outcome) == Transition::Failed {
                            warn!("Diagram generation failed: {}", ws.diagrams.error_message().unwrap_or_default());
                        }
                    }
                    None => info!("Diagram response arrived after logout, ignored"),
                }
            }
            Message::RequirementChanged(text) => {
                self.requirement = text;
            }
            Message::RequirementModelSelected(model) => {
                self.requirement_model = model.id;
            }
            Message::SubmitRequirement => {
                if !self.can_submit_requirement() {
                    return Command::none();
                }
                let request = RequirementRequest {
                    requirement_text: self.requirement.trim().to_string(),
                    model_id: self.requirement_model.clone(),
                };
                if let Some(ws) = self.gate.workspace_mut() {
                    let ticket = ws.submit_requirement();
                    info!("Evaluating requirement with {}", request.model_id);
                    return Command::perform(
                        dispatch::<EvaluateRequirement>(backend.clone(), ticket, request),
                        |(ticket, outcome)| Message::RequirementFinished { ticket, outcome },
                    );
                }
            }
            Message::RequirementFinished { ticket, outcome } => {
                match self.gate.workspace_mut() {
                    Some(ws) => {
                        if ws.finish_requirement(ticket, outcome) == Transition::Failed {
                            warn!("Requirement evaluation failed: {}", ws.requirements.error_message().unwrap_or_default());
                        }
                    }
                    None => info!("Requirement response arrived after logout, ignored"),
                }
            }
        }
        Command::none()
    }
}
