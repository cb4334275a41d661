use clap::Subcommand;
use taskdesk_core::integrations::LineEndpoint;
use taskdesk_core::{Config, LineClient};

use super::{print_forwarded, read_body, runtime};

#[derive(Subcommand)]
pub enum LineAction {
    /// POST to v2/bot/message/push
    Push {
        /// JSON body, or "-" to read stdin
        body: String,
    },
    /// POST to v2/bot/message/reply
    Reply {
        /// JSON body, or "-" to read stdin
        body: String,
    },
    /// POST to v2/bot/message/multicast
    Multicast {
        /// JSON body, or "-" to read stdin
        body: String,
    },
}

pub fn run(action: LineAction) -> Result<(), Box<dyn std::error::Error>> {
    let (endpoint, body) = match action {
        LineAction::Push { body } => (LineEndpoint::Push, body),
        LineAction::Reply { body } => (LineEndpoint::Reply, body),
        LineAction::Multicast { body } => (LineEndpoint::Multicast, body),
    };
    let payload = read_body(&body)?;

    let config = Config::load()?;
    let client = LineClient::from_config_standalone(&config)?;
    let forwarded = runtime()?.block_on(client.forward(endpoint, &payload))?;
    print_forwarded("LINE", forwarded)
}
