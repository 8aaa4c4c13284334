use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use brandforge::chat::ConversationClient;
use brandforge::constants;
use brandforge::service::BrandService;
use brandforge::Sender;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the interactive brand discovery and logo generation chat.
    Chat {
        #[arg(long, env = "BRANDFORGE_SERVER_URL", help = "Base URL of the wizard service.")]
        server_url: Option<String>,
        #[arg(
            long,
            default_value = ".",
            help = "Directory where /save writes the generated logo."
        )]
        logo_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for BRANDFORGE_SERVER_URL, RUST_LOG, etc.)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            server_url,
            logo_dir,
        } => {
            let server_url = server_url.unwrap_or_else(|| constants::SERVER_URL.clone());
            info!(%server_url, "starting brand chat");
            run_chat(server_url, logo_dir).await
        }
    }
}

async fn run_chat(server_url: String, logo_dir: PathBuf) -> Result<()> {
    let mut client = ConversationClient::new(BrandService::new(server_url));
    let mut printed = 0;
    let mut save_hint_shown = false;

    client.start().await;
    printed = print_new_messages(&client, printed);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/save" => client.save_logo(&logo_dir).await,
            input => client.submit(input).await,
        }
        printed = print_new_messages(&client, printed);

        if client.preview().is_visible() && !save_hint_shown {
            println!("(logo ready: type /save to download it, /quit to exit)");
            save_hint_shown = true;
        }
    }

    Ok(())
}

/// Print transcript entries appended since the last call; returns the new
/// high-water mark.
fn print_new_messages(client: &ConversationClient, printed: usize) -> usize {
    let messages = client.log().messages();
    for message in &messages[printed..] {
        match message.sender {
            Sender::User => println!("you: {}", message.text),
            Sender::Assistant => println!("assistant: {}", message.text),
        }
    }
    messages.len()
}
