use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Train(cmd::train::TrainArgs),
    Decrypt(cmd::decrypt::DecryptArgs),
    Sweep(cmd::sweep::SweepArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing CipherForge...");

    let result = match cli.command {
        Commands::Train(args) => cmd::train::run(args),
        Commands::Decrypt(args) => cmd::decrypt::run(args),
        Commands::Sweep(args) => cmd::sweep::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
