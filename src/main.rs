//! Spots - Entry Point

use clap::Parser;
use serde_json::Value;
use spots::composition::Composition;
use spots::model::{AppError, InputError};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Spots - build a composition from a JSON component document
#[derive(Parser, Debug)]
#[command(name = "spots")]
#[command(version)]
#[command(about = "Resolve a JSON component document into spots and report each item's view")]
pub struct Args {
    /// Path to JSON document (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Document key holding the component array
    #[arg(short, long)]
    pub key: Option<String>,

    /// Kind used for components whose kind is not registered
    #[arg(long)]
    pub default_kind: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = spots::config::load_config_with_precedence(args.config.clone())?;
        let merged = spots::config::merge_config(config_file);
        let with_env = spots::config::apply_env_overrides(merged);
        spots::config::apply_cli_overrides(with_env, args.key.clone(), args.default_kind.clone())
    };

    spots::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let document = read_document(args.file.as_deref())?;
    let factory = config.build_factory()?;
    let parser = spots::parser::Parser::new(&factory);
    let mut composition = Composition::from_document(&parser, &document, &config.root_key);

    info!(spots = composition.len(), "Composition built");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    spots::report::write_report(&mut out, &mut composition)?;
    out.flush()?;

    Ok(())
}

/// Read the document from `file`, or from stdin when no path is given.
fn read_document(file: Option<&Path>) -> Result<Value, InputError> {
    let text = match file {
        Some(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}
