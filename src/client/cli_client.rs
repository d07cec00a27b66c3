use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use uml_studio::client::config::{normalize_base, ClientConfig};
use uml_studio::client::models::session::{SessionGate, Workspace, INVALID_CREDENTIALS};
use uml_studio::client::services::backend::{BackendClient, EvaluateRequirement, GenerateDiagram};
use uml_studio::client::services::catalog::{load_catalog, CatalogSource};
use uml_studio::client::services::renderer::GraphvizEngine;
use uml_studio::client::services::workflow::{dispatch, Phase};
use uml_studio::common::models::{DiagramKind, DiagramRequest, RequirementRequest};
use uml_studio::utils::logger::StudioLogger;

#[derive(Parser, Debug)]
#[command(name = "uml-studio-cli", version, about = "Generate UML diagrams and validate requirements from the terminal")]
struct Cli {
    #[arg(long, env = "UML_STUDIO_USER")]
    username: String,

    #[arg(long, env = "UML_STUDIO_PASSWORD", hide_env_values = true)]
    password: String,

    /// Backend base address (overrides UML_BACKEND_URL)
    #[arg(long, value_name = "URL")]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the selectable models
    Models,
    /// Generate a UML diagram from a scenario description
    Generate {
        /// class, object, composite, sequence or usecase
        #[arg(long, default_value = "class")]
        kind: DiagramKind,

        #[arg(long)]
        model: Option<String>,

        /// Write the rendered SVG here (otherwise the DOT source is printed)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Also write the DOT source here
        #[arg(long, value_name = "PATH")]
        dot_out: Option<PathBuf>,

        #[arg(required = true, num_args = 1..)]
        scenario: Vec<String>,
    },
    /// Validate a requirement statement
    Validate {
        #[arg(long)]
        model: Option<String>,

        #[arg(required = true, num_args = 1..)]
        requirement: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(raw) = &cli.backend {
        config.backend_url = normalize_base(raw).with_context(|| format!("invalid --backend '{}'", raw))?;
    }
    StudioLogger::init(&config.log_level);
    config.log_summary();

    let backend = BackendClient::new(&config)?;
    let mut gate = SessionGate::new(Arc::new(GraphvizEngine));
    if !gate.attempt_login(&cli.username, &cli.password) {
        eprintln!("{}", INVALID_CREDENTIALS);
        return Ok(ExitCode::from(2));
    }
    let ws = gate.workspace_mut().context("session was not opened")?;

    if ws.begin_catalog_load() {
        let session = ws.session();
        let outcome = load_catalog(backend.clone()).await;
        ws.finish_catalog_load(session, outcome);
    }

    match cli.command {
        Commands::Models => {
            list_models(ws);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { kind, model, out, dot_out, scenario } => {
            let request = DiagramRequest {
                scenario_text: scenario.join(" ").trim().to_string(),
                diagram_kind: kind,
                model_id: model.unwrap_or_else(|| config.default_model.clone()),
            };
            generate(ws, &backend, request, out, dot_out).await
        }
        Commands::Validate { model, requirement } => {
            let request = RequirementRequest {
                requirement_text: requirement.join(" ").trim().to_string(),
                model_id: model.unwrap_or_else(|| config.default_model.clone()),
            };
            validate(ws, &backend, request).await
        }
    }
}

fn list_models(ws: &Workspace) {
    if ws.catalog.source() == CatalogSource::Fallback {
        println!("(backend catalog unavailable, showing built-in models)");
    }
    for model in ws.catalog.models() {
        match &model.provider {
            Some(provider) => println!("{}\t{}\t{} [{}]", model.id, model.name, model.description, provider),
            None => println!("{}\t{}\t{}", model.id, model.name, model.description),
        }
    }
}

async fn generate(
    ws: &mut Workspace,
    backend: &BackendClient,
    request: DiagramRequest,
    out: Option<PathBuf>,
    dot_out: Option<PathBuf>,
) -> Result<ExitCode> {
    if request.scenario_text.is_empty() {
        anyhow::bail!("scenario description is empty");
    }
    println!("Generating UML...");
    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend.clone(), ticket, request).await;
    ws.finish_diagram(ticket, outcome);

    if ws.diagrams.phase() == Phase::Failed {
        eprintln!("{}", ws.diagrams.error_message().unwrap_or_default());
        return Ok(ExitCode::FAILURE);
    }
    let Some(result) = ws.diagrams.result() else {
        return Ok(ExitCode::FAILURE);
    };

    if let Some(warning) = result.warning() {
        eprintln!("warning: {}", warning);
    }
    if !result.has_diagram() {
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(path) = &dot_out {
        std::fs::write(path, &result.dot_source)
            .with_context(|| format!("writing DOT source to {}", path.display()))?;
    }

    match out {
        Some(path) => match ws.renderer.surface() {
            Some(svg) => {
                std::fs::write(&path, svg)
                    .with_context(|| format!("writing diagram to {}", path.display()))?;
                println!("Diagram written to {}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("{}", ws.renderer.error().unwrap_or("diagram was not rendered"));
                Ok(ExitCode::FAILURE)
            }
        },
        None => {
            println!("{}", result.dot_source);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn validate(ws: &mut Workspace, backend: &BackendClient, request: RequirementRequest) -> Result<ExitCode> {
    if request.requirement_text.is_empty() {
        anyhow::bail!("requirement is empty");
    }
    println!("Evaluating requirement...");
    let ticket = ws.submit_requirement();
    let (ticket, outcome) = dispatch::<EvaluateRequirement>(backend.clone(), ticket, request).await;
    ws.finish_requirement(ticket, outcome);

    match (ws.requirements.phase(), ws.requirements.result()) {
        (Phase::Succeeded, Some(verdict)) => {
            if verdict.verdict.is_valid() {
                println!("✓ Valid Requirement");
            } else {
                println!("✗ Invalid Requirement");
            }
            println!();
            println!("{}", verdict.rationale);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprintln!("{}", ws.requirements.error_message().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}
