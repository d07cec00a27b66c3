use crate::client::services::backend::CallError;
use crate::client::services::workflow::Ticket;
use crate::common::models::{
    DiagramKind, DiagramResult, ModelDescriptor, RequirementVerdict,
};

#[derive(Debug, Clone)]
pub enum Message {
    None,
    // Session gate
    UsernameChanged(String),
    PasswordChanged(String),
    ToggleShowPassword,
    SubmitLogin,
    Logout,
    // Model catalog
    CatalogLoaded { session: u64, outcome: Result<Vec<ModelDescriptor>, CallError> },
    // Diagram generation
    ScenarioChanged(String),
    DiagramKindSelected(DiagramKind),
    DiagramModelSelected(ModelDescriptor),
    SubmitDiagram,
    DiagramFinished { ticket: Ticket, outcome: Result<DiagramResult, CallError> },
    // Requirement validation
    RequirementChanged(String),
    RequirementModelSelected(ModelDescriptor),
    SubmitRequirement,
    RequirementFinished { ticket: Ticket, outcome: Result<RequirementVerdict, CallError> },
}
