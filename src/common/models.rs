// Models shared between the GUI, the CLI and the backend wire format
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One selectable backend model. `id` is the value sent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ModelDescriptor {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            provider: None,
        }
    }
}

// Pick lists show the display name
impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Body of `GET /models`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelsResponse {
    pub models: Vec<ModelDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiagramKind {
    #[default]
    #[serde(rename = "class")]
    Class,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "composite")]
    Composite,
    #[serde(rename = "sequence")]
    Sequence,
    #[serde(rename = "usecase")]
    UseCase,
}

const ALL_KINDS: [DiagramKind; 5] = [
    DiagramKind::Class,
    DiagramKind::Object,
    DiagramKind::Composite,
    DiagramKind::Sequence,
    DiagramKind::UseCase,
];

impl DiagramKind {
    pub fn all() -> &'static [DiagramKind] {
        &ALL_KINDS
    }

    /// Wire value, as the backend expects it in `uml_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Class => "class",
            DiagramKind::Object => "object",
            DiagramKind::Composite => "composite",
            DiagramKind::Sequence => "sequence",
            DiagramKind::UseCase => "usecase",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiagramKind::Class => "Class Diagram",
            DiagramKind::Object => "Object Diagram",
            DiagramKind::Composite => "Composite Structure Diagram",
            DiagramKind::Sequence => "Sequence Diagram",
            DiagramKind::UseCase => "Use Case Diagram",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ALL_KINDS.iter().map(|k| k.as_str()).collect();
                format!("unknown diagram kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Body of `POST /generate-uml`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiagramRequest {
    #[serde(rename = "scenario")]
    pub scenario_text: String,
    #[serde(rename = "uml_type")]
    pub diagram_kind: DiagramKind,
    #[serde(rename = "model")]
    pub model_id: String,
}

/// Success body of `POST /generate-uml`.
///
/// Both fields are independently optional in practice: the backend may return a
/// renderable graph together with a soft error.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct DiagramResult {
    #[serde(default)]
    pub dot_source: String,
    #[serde(rename = "error", default, deserialize_with = "empty_as_none")]
    pub error_message: Option<String>,
}

impl DiagramResult {
    pub fn has_diagram(&self) -> bool {
        !self.dot_source.trim().is_empty()
    }

    /// Soft error to show inline next to (or instead of) the diagram.
    pub fn warning(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Body of `POST /evaluate-requirement`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequirementRequest {
    #[serde(rename = "requirement")]
    pub requirement_text: String,
    #[serde(rename = "model")]
    pub model_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "VALID")]
    Valid,
    #[serde(rename = "INVALID")]
    Invalid,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "VALID"),
            Verdict::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Success body of `POST /evaluate-requirement`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RequirementVerdict {
    #[serde(rename = "result")]
    pub verdict: Verdict,
    #[serde(rename = "reason", default)]
    pub rationale: String,
}

// The backend reports "no error" as an empty string
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
