use super::load_page;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lander_compiler_html::{compile_entries, CompileOptions, RenderMode};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page file (defaults to the configured page)
    pub page: Option<String>,

    /// Render mode (preview, export)
    #[arg(short, long, default_value = "export")]
    pub mode: RenderMode,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_path = config.page_path(cwd, args.page.as_deref());
    let page = load_page(&page_path)?;

    let options = CompileOptions::for_mode(args.mode).with_pretty(config.render.pretty);
    let html = compile_entries(&page.theme, &page.entries, &options);

    match args.output {
        Some(output) => {
            let output = PathBuf::from(cwd).join(output);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, html)?;
            println!(
                "  {} {} → {} ({})",
                "✓".green(),
                page_path.display(),
                output.display(),
                args.mode
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "theme": { "title": "Acme" },
        "parts": [
            { "id": "1", "type": "hero", "title": "Launch day" },
            { "id": "2", "type": "ticker" }
        ]
    }"#;

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.json"), PAGE).unwrap();
        let cwd = dir.path().display().to_string();

        render(
            RenderArgs {
                page: None,
                mode: RenderMode::Preview,
                output: Some(PathBuf::from("out/preview.html")),
            },
            &cwd,
        )
        .unwrap();

        let html = fs::read_to_string(dir.path().join("out/preview.html")).unwrap();
        assert!(html.contains("Launch day"));
        assert!(html.contains("data-action=\"edit\""));
        assert!(html.contains("Part type &quot;ticker&quot; is not supported yet."));
    }

    #[test]
    fn test_missing_page_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = render(
            RenderArgs {
                page: Some("nope.json".to_string()),
                mode: RenderMode::Export,
                output: None,
            },
            &dir.path().display().to_string(),
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("nope.json"));
    }
}
