mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, init, render, schema, serve, ExportArgs, InitArgs, RenderArgs, ServeArgs};
use tracing_subscriber::EnvFilter;

/// Lander CLI - landing pages assembled from parts
#[derive(Parser, Debug)]
#[command(name = "lander")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a starter page
    Init(InitArgs),

    /// Render a page file to HTML
    Render(RenderArgs),

    /// Package a page as a static site archive
    Export(ExportArgs),

    /// Print the part schema registry as JSON
    Schema,

    /// Start the render service
    Serve(ServeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Render(args) => render(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Schema => schema(),
                Command::Serve(args) => serve(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
