use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use lander_editor::Session;
use std::fs;
use std::path::PathBuf;

const DEFAULT_PARTS: &[&str] = &["hero", "features", "about", "contact"];

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Parts to start with, in order (e.g. hero,features,pricing)
    #[arg(short, long, value_delimiter = ',')]
    pub parts: Vec<String>,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing landing page...".bright_blue().bold());

    let parts: Vec<&str> = if args.parts.is_empty() {
        DEFAULT_PARTS.to_vec()
    } else {
        args.parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).collect()
    };

    let mut session = Session::new("init");
    for name in &parts {
        if *name == "footer" {
            continue;
        }
        session
            .add(name)
            .map_err(|e| anyhow!("Cannot add '{}': {}", name, e))?;
    }

    let config = Config::default();
    let page_path = config.page_path(cwd, None);
    if page_path.exists() && !args.force {
        println!("  {} Keeping existing {}", "•".dimmed(), config.page);
    } else {
        fs::write(&page_path, session.to_json()?)?;
        println!(
            "  {} Created {} ({} parts + footer)",
            "✓".green(),
            config.page,
            session.parts().len() - 1
        );
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", config.page);
    println!("  2. Run: lander render -o preview.html");
    println!("  3. Run: lander export");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lander_parts::{decode_page, PartType};

    fn cwd(dir: &tempfile::TempDir) -> String {
        dir.path().display().to_string()
    }

    #[test]
    fn test_init_writes_config_and_page() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                parts: vec!["hero".to_string(), "pricing".to_string()],
                force: false,
            },
            &cwd(&dir),
        )
        .unwrap();

        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
        let source = fs::read_to_string(dir.path().join("page.json")).unwrap();
        let page = decode_page(&source).unwrap().into_page();
        let types: Vec<PartType> = page.parts.iter().map(|p| p.part_type).collect();
        assert_eq!(types, [PartType::Hero, PartType::Pricing, PartType::Footer]);
    }

    #[test]
    fn test_init_rejects_unknown_part() {
        let dir = tempfile::tempdir().unwrap();
        let result = init(
            InitArgs {
                parts: vec!["carousel".to_string()],
                force: false,
            },
            &cwd(&dir),
        );

        assert!(result.is_err());
        assert!(!dir.path().join(DEFAULT_CONFIG_NAME).exists());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{}").unwrap();

        init(
            InitArgs {
                parts: Vec::new(),
                force: false,
            },
            &cwd(&dir),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(DEFAULT_CONFIG_NAME)).unwrap(),
            "{}"
        );
        assert!(!dir.path().join("page.json").exists());
    }
}
