use clap::Subcommand;
use taskdesk_core::integrations::keyring_store;
use taskdesk_core::storage::{LINE_TOKEN_KEY, TELEGRAM_TOKEN_KEY};
use taskdesk_core::{Config, LineClient, MessagingService, TelegramClient};

#[derive(Subcommand)]
pub enum AuthAction {
    /// LINE channel access token: set / clear / status
    Line {
        #[command(subcommand)]
        action: AuthOp,
    },
    /// Telegram bot token: set / clear / status
    Telegram {
        #[command(subcommand)]
        action: AuthOp,
    },
}

#[derive(Subcommand)]
pub enum AuthOp {
    /// Store the credential in the OS keyring
    Set {
        #[arg(long)]
        token: String,
    },
    /// Remove the credential from the OS keyring
    Clear,
    /// Check whether a credential resolves (env, config file or keyring)
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Line { action: op } => handle(op, LINE_TOKEN_KEY, line_service),
        AuthAction::Telegram { action: op } => handle(op, TELEGRAM_TOKEN_KEY, telegram_service),
    }
}

type ServiceFactory =
    fn(&Config) -> Result<Box<dyn MessagingService>, Box<dyn std::error::Error>>;

fn line_service(config: &Config) -> Result<Box<dyn MessagingService>, Box<dyn std::error::Error>> {
    Ok(Box::new(LineClient::from_config_standalone(config)?))
}

fn telegram_service(
    config: &Config,
) -> Result<Box<dyn MessagingService>, Box<dyn std::error::Error>> {
    Ok(Box::new(TelegramClient::from_config_standalone(config)?))
}

fn handle(op: AuthOp, key: &str, service: ServiceFactory) -> Result<(), Box<dyn std::error::Error>> {
    match op {
        AuthOp::Set { token } => {
            if token.trim().is_empty() {
                return Err("--token must not be empty".into());
            }
            keyring_store::set(key, token.trim())?;
            println!("credential stored");
        }
        AuthOp::Clear => {
            keyring_store::delete(key)?;
            println!("credential removed");
        }
        AuthOp::Status => {
            let service = service(&Config::load()?)?;
            println!(
                "{}: {}",
                service.display_name(),
                if service.is_configured() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
    }
    Ok(())
}
