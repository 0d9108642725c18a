mod commands;
mod settings;
mod store;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use commands::{Command, Outcome};
use store::LayoutStore;

#[derive(Parser)]
#[command(name = "zoner", about = "Edit edge-based window zone layouts")]
struct Cli {
    /// Layout to operate on (defaults to the one named in settings.json)
    #[arg(short, long, global = true)]
    layout: Option<String>,
    /// Override the configuration directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dir = cli
        .config_dir
        .or_else(settings::config_dir)
        .context("cannot determine a configuration directory")?;
    let settings = settings::load_settings(&dir);
    let store = LayoutStore::new(&dir);

    match &cli.command {
        Command::List => {
            for name in store.list()? {
                println!("{}", name);
            }
            return Ok(());
        }
        Command::Config {
            min_region_size,
            default_layout,
        } => {
            let mut settings = settings;
            if let Some(size) = min_region_size {
                settings.min_region_size = *size;
            }
            if let Some(name) = default_layout {
                settings.default_layout = name.clone();
            }
            if min_region_size.is_some() || default_layout.is_some() {
                settings::save_settings(&dir, &settings);
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        _ => {}
    }

    let name = cli.layout.unwrap_or(settings.default_layout);
    let mut layout = store.load_or_new(&name)?;
    layout.set_min_region_size(settings.min_region_size);

    match commands::execute(&mut layout, &cli.command)? {
        Outcome::Report(text) => println!("{}", text),
        Outcome::Changed(text) => {
            store.save(&layout)?;
            println!("{}", text);
        }
        Outcome::Refused(reason) => {
            eprintln!("zoner: {}", reason);
            std::process::exit(2);
        }
    }
    Ok(())
}
