use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use console::style;

pub mod args;
pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod ir;
pub mod operations;
pub mod provider;

use args::Args;
use config::Config;

const STDIN_NAME: &str = "<stdin>";

pub fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let account_map = config.account_map(args.provider.name())?;

    let (rows, source_name) = match &args.csv {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            (import::load_rows(file)?, path.display().to_string())
        }
        None => (
            import::load_rows(std::io::stdin().lock())?,
            STDIN_NAME.to_string(),
        ),
    };

    let transactions = args
        .provider
        .convert(rows, &account_map)
        .with_context(|| format!("Failed to import {} export {}", args.provider, source_name))?;
    operations::check_transactions_are_balanced(&transactions)?;
    log::info!("Imported {} transactions from {}", transactions.len(), source_name);

    let document = export::render_document(&source_name, &export::compose(&transactions));
    if !args.quiet {
        print!("{document}");
    }

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.provider.default_output()));
    std::fs::write(&output, &document)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    let needs_review = operations::count_needs_review(&transactions);
    if needs_review > 0 {
        eprintln!(
            "{}",
            style(format!("{needs_review} transactions need review (flagged with '!')")).yellow()
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::builtin()?);
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Config::from_yaml(&content).with_context(|| format!("Invalid config {}", path.display()))
}
