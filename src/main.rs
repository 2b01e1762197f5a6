use agentchat::Theme;
use agentchat::core::config::{self, CliOverrides};
use agentchat::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "agentchat", about = "Terminal chat with agents and documents")]
struct Args {
    /// Base URL of the agent/document service
    #[arg(long)]
    base_url: Option<String>,

    /// Colour theme
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Delay before the simulated assistant reply, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to agentchat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("agentchat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("{e}; using defaults");
        log::warn!("Falling back to default config: {e}");
        config::AppConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        theme: args.theme,
        reply_delay_ms: args.reply_delay_ms,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "agentchat starting up: backend={}, theme={:?}, reply_delay={:?}",
        resolved.base_url,
        resolved.theme,
        resolved.reply_delay
    );

    tui::run(resolved)
}
