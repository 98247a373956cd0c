use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lander_server::{router, AppState};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let app = router(AppState::new(config.assets, config.render.pretty));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        println!("{} http://{}", "🚀 Render service listening on".green().bold(), addr);
        axum::serve(listener, app).await?;
        Ok::<(), anyhow::Error>(())
    })
}
