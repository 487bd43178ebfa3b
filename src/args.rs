use std::path::PathBuf;

use clap::Parser;

use crate::provider::Provider;

/// Convert an Alipay, WeChat Pay or China Merchants Bank export into beancount entries
#[derive(Parser, Debug)]
pub struct Args {
    /// Provider the export comes from
    #[clap(value_enum)]
    pub provider: Provider,

    /// Path to the exported CSV file, reads stdin if omitted
    pub csv: Option<PathBuf>,

    /// YAML file with the account maps, the built-in maps are used if omitted
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the entries, defaults to a file named after the provider
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Don't print the entries to stdout
    #[clap(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
