use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "ragimage",
    version,
    about = "Submit prompts to a ragimage server and follow generation progress"
)]
pub struct Cli {
    /// Base URL of the generation server (overrides config and environment)
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub config: Option<String>,
    /// Number of reference images the server should retrieve
    #[arg(long, short = 'n')]
    pub num_images: Option<u32>,
    /// Save the generated image into this directory
    #[arg(long)]
    pub output_dir: Option<String>,
    #[arg(long, short, value_enum)]
    pub mode: Option<RunMode>,
    #[arg()]
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Full-screen interactive form
    Tui,
    /// Stream log lines to stdout and exit
    Line,
}

impl Cli {
    /// Prompt given as trailing arguments, if any
    pub fn prompt_text(&self) -> Option<String> {
        let joined = self.prompt.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Explicit mode, otherwise line mode when a prompt was passed
    pub fn resolved_mode(&self) -> RunMode {
        match self.mode {
            Some(mode) => mode,
            None if self.prompt_text().is_some() => RunMode::Line,
            None => RunMode::Tui,
        }
    }
}
