use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::FlashcardClient;
use tokio::io::{stdin, BufReader};
use tracing_subscriber::EnvFilter;

mod take;

#[derive(Parser, Debug)]
#[command(version, about = "Author flashcard decks, take quizzes and review scores")]
struct Cli {
    /// Base URL of the flashcards server.
    #[arg(long, env = "FLASHCARDS_SERVER_URL", default_value = "http://127.0.0.1:8088")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List deck names in creation order.
    List,
    /// List recorded scores in submission order.
    Scores,
    /// Create a deck from a file with one `front|back` card per line.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Print a deck's cards.
    Show {
        #[arg(long)]
        name: String,
        /// Print the raw JSON payload instead of `front|back` lines.
        #[arg(long)]
        json: bool,
    },
    /// Take a quiz over a deck and submit the score.
    Take {
        #[arg(long)]
        name: String,
        /// Name to record the score under; prompted for when omitted.
        #[arg(long)]
        taker: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = FlashcardClient::new(cli.server_url);

    match cli.command {
        Command::List => {
            for name in client.list_decks().await? {
                println!("{name}");
            }
        }
        Command::Scores => {
            for line in client.list_scores().await? {
                println!("{line}");
            }
        }
        Command::Create { name, file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let confirmation = client.save_deck_text(&name, &text).await?;
            println!("{confirmation}");
        }
        Command::Show { name, json } => {
            let deck = client.load_deck(&name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deck)?);
            } else {
                for card in &deck.value {
                    println!("{}|{}", card.front, card.back);
                }
            }
        }
        Command::Take { name, taker } => {
            let session = client.start_quiz(&name).await?;
            let mut input = BufReader::new(stdin());
            let mut output = std::io::stdout();
            take::run(session, taker, &client, &mut input, &mut output).await?;
        }
    }

    Ok(())
}
