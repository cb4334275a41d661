use clap::Subcommand;
use taskdesk_core::{Config, TelegramClient};

use super::{print_forwarded, read_body, runtime};

#[derive(Subcommand)]
pub enum TelegramAction {
    /// Call sendMessage
    Send {
        /// JSON body, or "-" to read stdin
        body: String,
    },
    /// Call any Bot API method
    Call {
        /// Method name (e.g. "getMe")
        method: String,
        /// JSON body, or "-" to read stdin
        #[arg(default_value = "{}")]
        body: String,
    },
}

pub fn run(action: TelegramAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = TelegramClient::from_config_standalone(&config)?;
    let rt = runtime()?;

    let forwarded = match action {
        TelegramAction::Send { body } => {
            let payload = read_body(&body)?;
            rt.block_on(client.send_message(&payload))?
        }
        TelegramAction::Call { method, body } => {
            let payload = read_body(&body)?;
            rt.block_on(client.call(&method, &payload))?
        }
    };
    print_forwarded("Telegram", forwarded)
}
