use crate::client::services::workflow::WorkflowObserver;
use crate::common::models::DiagramResult;
use graphviz_rust::cmd::{CommandArg, Format};
use log::{debug, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("graphviz failed: {0}")]
    Engine(String),
    #[error("graphviz produced no output")]
    EmptyOutput,
}

/// External layout engine turning DOT source into an image.
pub trait DotEngine: Send + Sync {
    fn render(&self, dot_source: &str) -> Result<Vec<u8>, RenderError>;
}

/// Graphviz `dot`, producing SVG.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizEngine;

impl DotEngine for GraphvizEngine {
    fn render(&self, dot_source: &str) -> Result<Vec<u8>, RenderError> {
        let svg = graphviz_rust::exec_dot(
            dot_source.to_string(),
            vec![CommandArg::Format(Format::Svg)],
        )
        .map_err(|e| RenderError::Engine(e.to_string()))?;
        if svg.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(svg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// The result had no DOT source; it is shown as text only.
    Skipped,
    Failed,
}

/// Owns the visual surface of the diagram panel. Each render replaces the
/// previous output.
pub struct DiagramRenderer {
    engine: Arc<dyn DotEngine>,
    last_source: Option<String>,
    surface: Option<Vec<u8>>,
    error: Option<String>,
}

impl DiagramRenderer {
    pub fn new(engine: Arc<dyn DotEngine>) -> Self {
        Self {
            engine,
            last_source: None,
            surface: None,
            error: None,
        }
    }

    pub fn render(&mut self, result: &DiagramResult) -> RenderOutcome {
        if !result.has_diagram() {
            debug!("Diagram result carries no DOT source, nothing to render");
            self.clear();
            return RenderOutcome::Skipped;
        }

        match self.engine.render(&result.dot_source) {
            Ok(image) => {
                self.surface = Some(image);
                self.error = None;
                self.last_source = Some(result.dot_source.clone());
                RenderOutcome::Rendered
            }
            Err(e) => {
                warn!("Diagram render failed: {}", e);
                self.surface = None;
                self.error = Some(e.to_string());
                self.last_source = Some(result.dot_source.clone());
                RenderOutcome::Failed
            }
        }
    }

    pub fn clear(&mut self) {
        self.last_source = None;
        self.surface = None;
        self.error = None;
    }

    /// Rendered image bytes (SVG for the Graphviz engine).
    pub fn surface(&self) -> Option<&[u8]> {
        self.surface.as_deref()
    }

    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl WorkflowObserver<DiagramResult> for DiagramRenderer {
    fn on_succeeded(&mut self, result: &DiagramResult) {
        self.render(result);
    }
}
