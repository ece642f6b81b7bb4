pub mod cli;
pub mod line;
pub mod tui;

pub use cli::{Cli, RunMode};

use ragimage_core::config::loader::{expand_path, validate};
use ragimage_core::logging::init_tracing;
use ragimage_core::{AppConfig, GenerateClient, GenerateRequest};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tui::screens::{GenerateResult, run_generate};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mode = cli.resolved_mode();
    init_tracing(mode == RunMode::Tui);
    info!("Starting ragimage");
    debug!(mode = ?mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }
    apply_cli_overrides(&cli, &mut config);
    validate(&config)?;

    let client = Arc::new(GenerateClient::from_config(&config)?);
    info!(mode = ?mode, endpoint = client.endpoint(), "Running client in selected mode");

    match mode {
        RunMode::Line => {
            let prompt = cli
                .prompt_text()
                .unwrap_or_else(|| config.default_prompt.clone());
            let request = GenerateRequest::new(prompt, config.num_images)?;
            line::run(client, request, config.output_dir.clone()).await?;
        }
        RunMode::Tui => {
            if let Some(prompt) = cli.prompt_text() {
                config.default_prompt = prompt;
            }
            match run_generate(client, &config).await? {
                GenerateResult::Exit => {}
                GenerateResult::Error(message) => return Err(message.into()),
            }
        }
    }
    info!("Client execution finished");
    Ok(())
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(endpoint) = &cli.endpoint {
        info!(endpoint = endpoint.as_str(), "Overriding endpoint based on CLI flag");
        config.endpoint = endpoint.clone();
    }
    if let Some(num_images) = cli.num_images {
        config.num_images = num_images;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = Some(expand_path(dir));
    }
}
