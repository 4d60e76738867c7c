//! LeadFlow CLI - sign in and manage leads in the LeadFlow CRM

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;

use cli::{Cli, Commands, GlobalOptions, LeadCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("leadflow", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Signup {
            username,
            email,
            password,
        } => cli::auth::signup(&opts, username, email, password).await,
        Commands::Login { username, password } => {
            cli::auth::login(&opts, username, password).await
        }
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Status => cli::status::run(&opts).await,
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Version => {
            println!("leadflow version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Lead(lead_cmd) => match lead_cmd {
            LeadCommands::List { filters, limit } => cli::lead::list(&opts, &filters, limit).await,
            LeadCommands::Get { id } => cli::lead::get(&opts, id).await,
            LeadCommands::Recent => cli::lead::recent(&opts).await,
            LeadCommands::Stats => cli::lead::stats(&opts).await,
            LeadCommands::Create { fields } => cli::lead::create(&opts, &fields).await,
            LeadCommands::Update { id, fields } => cli::lead::update(&opts, id, &fields).await,
            LeadCommands::Delete { ids, yes } => cli::lead::delete(&opts, &ids, yes).await,
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
