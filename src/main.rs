use clap::Parser;

use cahier::cli::{self, Cli, Command};
use cahier::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let config = Config::from_env();

    let pool = cahier::db::init_pool(&config.database_url).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve(pool, &config).await,
        Command::Seed => cli::seed_sample_data(&pool).await,
    }
}
