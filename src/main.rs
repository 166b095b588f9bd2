use appinfra_signup::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => cli::validate::run(args),
        Command::Check(args) => cli::check::run(args).await,
        Command::Requirements(args) => cli::requirements::run(args),
    }
}
