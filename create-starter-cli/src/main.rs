//! create-starter CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use create_starter_lib::commands::NewCommand;
use create_starter_lib::{observability, ScaffoldConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "create-starter")]
#[command(version)]
#[command(about = "Scaffold a Vue, React or Nest starter project", long_about = None)]
struct Cli {
    /// Target directory (prompted when omitted)
    target_dir: Option<String>,

    /// Template to use (vue, vue-ts, react-ts, nest)
    #[arg(short, long)]
    template: Option<String>,

    /// Directory containing `template-<name>` packages
    #[arg(long, value_name = "DIR")]
    templates_dir: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let config = ScaffoldConfig::load()?.with_templates_dir(cli.templates_dir);
    let cmd = NewCommand::new(cli.target_dir, cli.template);
    cmd.execute(&config)?;

    Ok(())
}
