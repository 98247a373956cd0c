use clap::Parser;
use colored::Colorize;
use lander_assets::IngestOptions;
use lander_server::{router, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lander-server")]
#[command(about = "Render service for Lander landing pages", long_about = None)]
#[command(version)]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Emit compact HTML
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let app = router(AppState::new(IngestOptions::default(), !args.compact));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("{} http://{}", "Listening on".green(), addr);

    axum::serve(listener, app).await?;
    Ok(())
}
