use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jsonhtmlify::{json_to_html, RenderConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Convert JSON to class-annotated HTML
#[derive(Debug, Parser)]
#[command(name = "jsonhtmlify", version, about)]
struct Cli {
    /// Input JSON file; reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Emit explicit colon and comma separator elements
    #[arg(long)]
    all_tags: bool,

    /// With --all-tags, keep the comma after the last item (marked is-trailing)
    #[arg(long)]
    trailing_commas: bool,

    /// JSON file with render options (`all_tags`, `trailing_commas`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let base = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str::<RenderConfig>(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        // Flags can only switch options on.
        Ok(base
            .with_all_tags(base.all_tags || self.all_tags)
            .with_trailing_commas(base.trailing_commas || self.trailing_commas))
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                Ok(content)
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.render_config()?;
    info!(?config, input = ?cli.input, "rendering");

    let content = cli.read_input()?;
    let json: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse JSON input")?;

    let (tree, root) = json_to_html(&json, &config)?;
    println!("{}", tree.to_html(root));

    Ok(())
}
