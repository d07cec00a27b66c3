//! Session gate and the per-session workspace it owns.
//!
//! The gate is a fixed-credential placeholder in front of the studio, not an
//! authentication mechanism. Everything that belongs to a logged-in session
//! (model catalog, both workflows, the renderer) lives in [`Workspace`] and is
//! dropped on logout.

use crate::client::services::backend::{CallError, EvaluateRequirement, GenerateDiagram};
use crate::client::services::catalog::ModelCatalog;
use crate::client::services::renderer::{DiagramRenderer, DotEngine};
use crate::client::services::workflow::{Ticket, Transition, Workflow};
use crate::common::models::{DiagramResult, ModelDescriptor, RequirementVerdict};
use log::{debug, info};
use std::sync::Arc;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

const GATE_USERNAME: &str = "admin";
const GATE_PASSWORD: &str = "admin";

pub struct Workspace {
    session: u64,
    pub catalog: ModelCatalog,
    pub diagrams: Workflow<GenerateDiagram>,
    pub requirements: Workflow<EvaluateRequirement>,
    pub renderer: DiagramRenderer,
}

impl Workspace {
    fn new(session: u64, engine: Arc<dyn DotEngine>) -> Self {
        Self {
            session,
            catalog: ModelCatalog::default(),
            diagrams: Workflow::new(session),
            requirements: Workflow::new(session),
            renderer: DiagramRenderer::new(engine),
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn begin_catalog_load(&mut self) -> bool {
        self.catalog.begin_load()
    }

    pub fn finish_catalog_load(&mut self, session: u64, outcome: Result<Vec<ModelDescriptor>, CallError>) -> bool {
        if session != self.session {
            debug!("Dropping catalog response for closed session {}", session);
            return false;
        }
        self.catalog.apply_load(outcome)
    }

    pub fn submit_diagram(&mut self) -> Ticket {
        self.renderer.clear();
        self.diagrams.begin()
    }

    pub fn finish_diagram(&mut self, ticket: Ticket, outcome: Result<DiagramResult, CallError>) -> Transition {
        self.diagrams.complete_observed(ticket, outcome, &mut self.renderer)
    }

    pub fn submit_requirement(&mut self) -> Ticket {
        self.requirements.begin()
    }

    pub fn finish_requirement(
        &mut self,
        ticket: Ticket,
        outcome: Result<RequirementVerdict, CallError>,
    ) -> Transition {
        self.requirements.complete(ticket, outcome)
    }
}

/// Process-wide session context, passed to whoever needs it.
pub struct SessionGate {
    engine: Arc<dyn DotEngine>,
    workspace: Option<Workspace>,
    sessions_opened: u64,
}

impl SessionGate {
    pub fn new(engine: Arc<dyn DotEngine>) -> Self {
        Self {
            engine,
            workspace: None,
            sessions_opened: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    pub fn workspace_mut(&mut self) -> Option<&mut Workspace> {
        self.workspace.as_mut()
    }

    /// Unlock the studio. A failed attempt leaves the current state untouched.
    pub fn attempt_login(&mut self, username: &str, password: &str) -> bool {
        if username != GATE_USERNAME || password != GATE_PASSWORD {
            info!("Login rejected for '{}'", username);
            return false;
        }
        if self.workspace.is_none() {
            self.sessions_opened += 1;
            self.workspace = Some(Workspace::new(self.sessions_opened, self.engine.clone()));
            info!("Session {} opened", self.sessions_opened);
        }
        true
    }

    /// Lock the studio and discard all workflow state of the session.
    pub fn logout(&mut self) {
        if let Some(workspace) = self.workspace.take() {
            info!("Session {} closed", workspace.session);
        }
    }
}
