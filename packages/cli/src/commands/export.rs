use super::load_page;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use lander_bundle::{write_archive_file, ExportPackage, PackageOptions};
use std::fs;
use std::path::PathBuf;

const ARCHIVE_NAME: &str = "landing-page.zip";

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page file (defaults to the configured page)
    pub page: Option<String>,

    /// Archive path (defaults to <outDir>/landing-page.zip)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_path = config.page_path(cwd, args.page.as_deref());
    let page = load_page(&page_path)?;

    let output = match args.output {
        Some(output) => PathBuf::from(cwd).join(output),
        None => config.get_out_dir(cwd).join(ARCHIVE_NAME),
    };
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    println!("{}", "📦 Exporting landing page...".bright_blue().bold());

    let package = ExportPackage::from_entries(
        &page.theme,
        &page.entries,
        &PackageOptions {
            pretty: config.render.pretty,
        },
    );
    for name in package.names() {
        println!("  {} {}", "✓".green(), name);
    }

    let size = write_archive_file(package.entries(), &output)
        .with_context(|| format!("Cannot write {}", output.display()))?;

    println!();
    println!(
        "{} Wrote {} ({} bytes)",
        "✅".green(),
        output.display(),
        size
    );
    Ok(())
}
