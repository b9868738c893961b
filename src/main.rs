//! Calcula Aí - arithmetic tutoring chat
//!
//! A terminal front end for a conversation state machine that talks to a
//! remote tutoring service.

mod config;
mod prompts;
mod runtime;
mod state_machine;
mod transcript;
mod tutor;

use config::TutorConfig;
use runtime::ConversationController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use transcript::Author;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutor::{HttpTutorClient, LoggingClient};

const QUIT_COMMAND: &str = "/sair";
const INPUT_QUEUE: usize = 16;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Configuration
    let config = TutorConfig::from_env()?;
    tracing::info!(
        endpoint = %config.endpoint_url,
        timeout_secs = config.timeout.as_secs(),
        "Using tutoring endpoint"
    );

    let client = LoggingClient::new(HttpTutorClient::new(&config)?);
    let controller = ConversationController::new(client);
    let mut messages = controller.subscribe();

    // Print bot messages as they land; the student's own lines are already
    // on screen
    let printer = tokio::spawn(async move {
        loop {
            match messages.recv().await {
                Ok(message) if message.author == Author::Bot => {
                    println!("Calcula Aí: {}", message.text);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Transcript printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let (input_tx, input_rx) = mpsc::channel::<String>(INPUT_QUEUE);
    let session = tokio::spawn(controller.run(input_rx));

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match stdin.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        }
        let line = decode_line(&buf);
        if line.trim() == QUIT_COMMAND {
            break;
        }
        if input_tx.send(line).await.is_err() {
            break;
        }
    }

    // Closing the queue ends the session once pending lines are handled
    drop(input_tx);
    session.await?;
    printer.await?;

    Ok(())
}

/// One raw stdin line as text. Invalid UTF-8 is replaced rather than
/// ending the session.
fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "calcula_ai=warn".into());
    let json = std::env::var("CALCULA_LOG_JSON").is_ok_and(|v| v == "1");

    // Logs go to stderr so stdout carries only the conversation
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
