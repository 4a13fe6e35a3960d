use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use complexapp::chat::LiveChat;
use complexapp::logging::init_tracing;
use complexapp::search::SearchPhase;
use complexapp::{Client, Config};

/// How long `chat` waits for the channel after startup.
const CHAT_CONNECT_WAIT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "complexapp")]
#[command(version)]
#[command(about = "Headless client for the ComplexApp social posting site", long_about = None)]
struct Args {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a session
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Run a live search and print the results
    Search { term: String },
    /// Send stdin lines to the chat and print incoming messages
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    let timeout = Duration::from_secs(config.server.request_timeout_seconds);

    let client = Client::from_config(config).context("starting client")?;
    client.start();

    let result = match args.command {
        Command::Login { username, password } => login(&client, &username, password).await,
        Command::Logout => {
            client.logout();
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match client.store().state().session.username() {
                Some(username) => println!("{username}"),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Command::Search { term } => search(&client, &term, timeout).await,
        Command::Chat => chat(&client).await,
    };

    print_flash_messages(&client);
    client.shutdown().await;
    result
}

async fn login(client: &Client, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_line(&mut stdin_lines())
            .await?
            .context("no password on stdin")?,
    };
    client.login(username, password.trim_end()).await?;
    Ok(())
}

async fn search(client: &Client, term: &str, timeout: Duration) -> Result<()> {
    let engine = client.open_search();
    let mut updates = engine.subscribe();
    engine.input(term);
    if term.trim().is_empty() {
        return Ok(());
    }

    let debounce = client.context().config.search.debounce();
    let state = tokio::time::timeout(
        debounce + timeout,
        updates.wait_for(|state| state.phase == SearchPhase::Results),
    )
    .await
    .context("search timed out")?
    .context("search closed")?
    .clone();

    if let Some(error) = state.error {
        bail!(error);
    }
    if state.results.is_empty() {
        println!("No results for \"{term}\".");
    }
    for post in state.results {
        println!("{}  {}  (by {})", post.id, post.title, post.author.username);
    }
    Ok(())
}

async fn chat(client: &Client) -> Result<()> {
    if !client.store().state().logged_in() {
        bail!("log in first");
    }
    let mut updates = client.chat_updates();
    let live = tokio::time::timeout(CHAT_CONNECT_WAIT, updates.wait_for(Option::is_some))
        .await
        .context("chat did not connect")?
        .context("chat closed")?
        .clone();
    let Some(live) = live else {
        bail!("chat did not connect");
    };

    let printer = tokio::spawn(print_messages(Arc::clone(&live)));
    let mut lines = stdin_lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = read_line(&mut lines) => {
                let Some(line) = line? else { break };
                live.set_draft(line);
                live.send()?;
            }
        }
    }
    printer.abort();
    Ok(())
}

async fn print_messages(live: Arc<LiveChat>) {
    let mut updates = live.subscribe();
    let mut printed = updates.borrow_and_update().messages.len();
    while updates.changed().await.is_ok() {
        let messages = updates.borrow_and_update().messages.clone();
        for message in messages.iter().skip(printed) {
            println!("{}: {}", message.author, message.text);
        }
        printed = messages.len();
    }
}

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    let line = lines.next_line().await.context("reading stdin")?;
    Ok(line.map(|line| line.trim_end_matches('\r').to_owned()))
}

fn print_flash_messages(client: &Client) {
    for message in &client.store().state().flash_messages {
        println!("{message}");
    }
}
