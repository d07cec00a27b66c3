use crate::client::services::backend::{BackendClient, CallError};
use crate::common::models::ModelDescriptor;
use log::{info, warn};
use std::collections::HashSet;

/// Built-in model list used until (and unless) the backend provides one.
pub fn default_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("llama3-8b-8192", "LLAMA3 8B", "Fast and efficient 8B parameter model"),
        ModelDescriptor::new("llama3-70b-8192", "LLAMA3 70B", "More powerful 70B parameter model"),
        ModelDescriptor::new("mixtral-8x7b-32768", "Mixtral 8x7B", "Mixture of experts model with 32k context"),
        ModelDescriptor::new("gemma-7b-it", "Gemma 7B", "Google's Gemma 7B instruction-tuned model"),
        ModelDescriptor::new("gemma2-9b-it", "Gemma 2 9B", "Latest Gemma 2 9B instruction-tuned model"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Fallback,
    Backend,
}

/// Selectable models, shared read-only by both workflows.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
    source: CatalogSource,
    load_requested: bool,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            models: default_models(),
            source: CatalogSource::Fallback,
            load_requested: false,
        }
    }
}

impl ModelCatalog {
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn find(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Returns true exactly once; the caller issues the fetch only then.
    pub fn begin_load(&mut self) -> bool {
        if self.load_requested {
            return false;
        }
        self.load_requested = true;
        true
    }

    /// Apply the outcome of the fetch. Any failure leaves the current list untouched.
    /// Returns whether the catalog was replaced.
    pub fn apply_load(&mut self, outcome: Result<Vec<ModelDescriptor>, CallError>) -> bool {
        let models = match outcome.and_then(validate_catalog) {
            Ok(models) => models,
            Err(e) => {
                warn!("Model catalog load failed, keeping {} built-in models: {}", self.models.len(), e);
                return false;
            }
        };
        info!("Model catalog loaded from backend: {} models", models.len());
        self.models = models;
        self.source = CatalogSource::Backend;
        true
    }
}

/// Reject lists that would break selection: empty, or with repeated ids.
pub fn validate_catalog(models: Vec<ModelDescriptor>) -> Result<Vec<ModelDescriptor>, CallError> {
    if models.is_empty() {
        return Err(CallError::Malformed("backend returned an empty model list".to_string()));
    }
    let mut seen = HashSet::new();
    for model in &models {
        if !seen.insert(model.id.as_str()) {
            return Err(CallError::Malformed(format!("duplicate model id '{}'", model.id)));
        }
    }
    Ok(models)
}

/// Fetch the catalog once from the backend.
pub async fn load_catalog(backend: BackendClient) -> Result<Vec<ModelDescriptor>, CallError> {
    backend.fetch_models().await
}
