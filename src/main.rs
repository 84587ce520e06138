//! # kb-chat CLI (`kbchat`)
//!
//! Terminal front-end for the knowledge-grounded chat session.
//!
//! ## Usage
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! kbchat chat
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kbchat chat` | Start an interactive chat session |
//! | `kbchat prompt "<question>"` | Print the prompt that would be sent (debugging aid) |
//!
//! Inside a chat session, lines starting with `/` manage the knowledge
//! base (`/text`, `/qa`, `/file`, `/kb`, `/help`, `/quit`); everything
//! else is sent to the model as a chat turn.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

use kb_chat::chat::{ChatSession, TurnOutcome};
use kb_chat::completion::{GeminiClient, API_KEY_ENV};
use kb_chat::config::load_config;
use kb_chat::extract::DefaultPdfExtractor;
use kb_chat::ingest::{file_fragment, manual_fragment, qa_fragment};
use kb_chat::knowledge::KnowledgeBase;
use kb_chat::prompt::build_prompt;

/// kb-chat — chat with a hosted model grounded in your own notes and files.
#[derive(Parser)]
#[command(
    name = "kbchat",
    about = "Chat with a hosted model grounded strictly in your own knowledge base",
    version,
    long_about = "kb-chat keeps a small in-memory knowledge base built from pasted text, \
    Q&A entries, and text/markdown/PDF files, and sends it along with every question so \
    the model answers only from your data. Requires the GEMINI_API_KEY environment variable."
)]
struct Cli {
    /// Path to configuration file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "./config/kbchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    ///
    /// The knowledge base starts empty; add to it with `/text`, `/qa`,
    /// and `/file` before or between questions. State is in-memory only
    /// and lost when the session ends.
    Chat,

    /// Print the prompt that would be sent for a question.
    ///
    /// Builds the grounded prompt without calling the model. Useful for
    /// checking what the model actually sees.
    Prompt {
        /// The user question to embed in the prompt.
        question: String,

        /// Optional file whose text is used as the knowledge base.
        #[arg(long)]
        knowledge: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Chat => run_chat(&config).await,
        Commands::Prompt {
            question,
            knowledge,
        } => {
            let kb_text = match knowledge {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => String::new(),
            };
            println!("{}", build_prompt(&question, &kb_text));
            Ok(())
        }
    }
}

const HELP: &str = "\
Commands:
  /text <text>              add free text to the knowledge base
  /qa <question> | <answer> add a question/answer pair
  /file <path>              add a .txt, .md, or .pdf file
  /kb                       show the current knowledge base
  /help                     show this help
  /quit                     end the session
Anything else is sent to the model as a question.";

/// Run the interactive session: read a line, dispatch it as a knowledge
/// command or a chat turn, redraw after every transition.
async fn run_chat(config: &kb_chat::config::Config) -> Result<()> {
    // Missing credential is fatal before the first turn.
    let client = GeminiClient::from_config(config)
        .with_context(|| format!("Cannot start: set {API_KEY_ENV} and try again"))?;

    let mut knowledge = KnowledgeBase::new();
    let mut session = ChatSession::new();

    if let Some(greeting) = session.messages().first() {
        println!("assistant: {}\n", greeting.content);
    }
    println!("{HELP}\n");

    let mut stdout = tokio::io::stdout();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"you: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        if let Some(rest) = line.strip_prefix('/') {
            if !handle_command(rest, &mut knowledge)? {
                break;
            }
            continue;
        }

        match session.send(&client, &line, knowledge.as_text()).await {
            TurnOutcome::Replied | TurnOutcome::Failed => {
                if let Some(reply) = session.messages().last() {
                    println!("assistant: {}\n", reply.content);
                }
            }
            TurnOutcome::Rejected | TurnOutcome::Ignored => {}
        }
    }

    Ok(())
}

/// Dispatch one `/command` line. Returns `false` when the session should
/// end. Ingestion rejections print an inline notice and change nothing.
fn handle_command(command: &str, knowledge: &mut KnowledgeBase) -> Result<bool> {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => return Ok(false),
        "help" => println!("{HELP}\n"),
        "kb" => {
            if knowledge.is_empty() {
                println!("(the knowledge base is empty)\n");
            } else {
                println!("{}\n", knowledge.as_text());
            }
        }
        "text" => match manual_fragment(rest) {
            Ok(fragment) => {
                knowledge.append(&fragment);
                println!("(added {} bytes of text)\n", rest.trim().len());
            }
            Err(e) => println!("({e})\n"),
        },
        "qa" => {
            let Some((question, answer)) = rest.split_once('|') else {
                println!("(usage: /qa <question> | <answer>)\n");
                return Ok(true);
            };
            match qa_fragment(question, answer) {
                Ok(fragment) => {
                    knowledge.append(&fragment);
                    println!("(added Q&A pair)\n");
                }
                Err(e) => println!("({e})\n"),
            }
        }
        "file" => {
            if rest.is_empty() {
                println!("(usage: /file <path>)\n");
                return Ok(true);
            }
            ingest_file(rest, knowledge);
        }
        other => println!("(unknown command: /{other} — try /help)\n"),
    }

    Ok(true)
}

/// Read a local file and append it to the knowledge base.
///
/// The kind is decided from the filename extension; content is read as
/// raw bytes so PDFs work. Failures print a notice and change nothing.
fn ingest_file(path: &str, knowledge: &mut KnowledgeBase) {
    let filename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, path, "file read failed");
            println!("(could not read {path}: {e})\n");
            return;
        }
    };

    match file_fragment(&DefaultPdfExtractor, &bytes, "", &filename) {
        Ok(fragment) => {
            knowledge.append(&fragment);
            println!("(added content from {filename})\n");
        }
        Err(e) => {
            tracing::error!(error = %e, path, "file ingestion failed");
            println!("({e})\n");
        }
    }
}
