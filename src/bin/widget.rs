//! Terminal stand-in for the chat widget: reads lines from stdin and
//! drives a conversation session against a running relay.

use nova_relay::config::Config;
use nova_relay::conversation::{ChatSession, SessionContext};
use nova_relay::relay::{HttpLeadSink, RelayClient};
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_relay=warn".into()),
        )
        .init();

    let config = Config::from_env();

    let context = SessionContext {
        user_name: config.user_name.clone(),
        email_policy: config.email_policy,
    };
    let mut session = ChatSession::new(
        RelayClient::new(&config.relay_url),
        Arc::new(HttpLeadSink::new(&config.relay_url)),
        context,
    )
    .with_history_cap(config.history_cap);

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    stdout
        .write_all("Nova está lista. Escribe un mensaje (Ctrl-D para salir).\n".as_bytes())
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let reply = session.send(text).await;
        stdout.write_all(format!("{reply}\n").as_bytes()).await?;
    }

    Ok(())
}
