use iced::Application;
use uml_studio::client::config::ClientConfig;
use uml_studio::client::gui::app::{StudioApp, StudioFlags};
use uml_studio::client::services::backend::BackendClient;
use uml_studio::utils::logger::StudioLogger;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    StudioLogger::init(&config.log_level);
    config.log_summary();

    let backend = BackendClient::new(&config)?;
    StudioApp::run(iced::Settings::with_flags(StudioFlags { config, backend }))
        .map_err(|e| anyhow::anyhow!("GUI terminated: {}", e))?;
    Ok(())
}
