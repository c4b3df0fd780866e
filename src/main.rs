use clap::Parser;
use jobstats::cli::Cli;

fn main() -> anyhow::Result<()> {
    // .env supplies SUPERJOB_API_KEY before arguments are read
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.run()
}
