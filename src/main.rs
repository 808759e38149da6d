use clap::Parser;
use phonebook::seed::{self, SeedArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine, MONGODB_URI may come from the shell
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(anyhow::Error::new(err).context("failed to read .env"));
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let args = SeedArgs::parse();
    let contact = seed::run(args).await?;
    println!("{}", seed::confirmation(&contact));

    Ok(())
}
