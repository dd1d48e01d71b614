use clap::Parser;

use ttlinker::config::{CliArgs, Command, StaticConfig, get_config, init_config};
use ttlinker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    if let Some(Command::GenerateConfig { output }) = args.command {
        StaticConfig::default().save_to_file(&output)?;
        println!("Sample configuration written to {}", output);
        return Ok(());
    }

    if let Err(e) = init_config(&args.config) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    let config = get_config();
    let _log_guard = init_logging(&config.logging)?;

    ttlinker::runtime::modes::run_server().await
}
