use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "taskdesk-cli", version, about = "taskdesk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task event log
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Notification log
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Forward a request to the LINE Messaging API
    Line {
        #[command(subcommand)]
        action: commands::line::LineAction,
    },
    /// Forward a request to the Telegram Bot API
    Telegram {
        #[command(subcommand)]
        action: commands::telegram::TelegramAction,
    },
    /// Credential management for the messaging services
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Task reports from a JSON export
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { action } => commands::log::run(action),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Line { action } => commands::line::run(action),
        Commands::Telegram { action } => commands::telegram::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Report { action } => commands::report::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
