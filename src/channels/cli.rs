//! CLI channel — stdin/stdout REPL for local testing.
//!
//! Drives the same engine as the webhooks under a fixed local phone number,
//! so a developer can walk the whole assessment without a gateway.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::error;

use crate::session::{ChannelKind, SessionEngine};

const LOCAL_PHONE: &str = "+254700000000";

/// Spawn the REPL loop. Reads lines from stdin until EOF.
pub fn spawn_cli_channel(engine: Arc<SessionEngine>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        eprint!("> ");

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        eprint!("> ");
                        continue;
                    }
                    match engine
                        .handle_message(LOCAL_PHONE, ChannelKind::Cli, &line)
                        .await
                    {
                        Ok(reply) => println!("\n{}\n", reply.text),
                        Err(e) => {
                            error!(error = %e, "CLI turn failed");
                            println!("\n{}\n", engine.apology());
                        }
                    }
                    eprint!("> ");
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    })
}
