//! # Yojana — Government Scheme Assistant
//!
//! Answers natural-language questions about government welfare schemes,
//! in text or voice, across several Indian languages.
//!
//! Usage:
//!   yojana ask "schemes for farmers"        # One-shot question
//!   yojana chat                             # Interactive session
//!   yojana voice query.wav                  # Voice query
//!   yojana search --sector agriculture      # Advanced catalog search
//!   yojana import schemes.json              # Load scheme records
//!   yojana stats                            # Catalog statistics

use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use yojana_bot::Chatbot;
use yojana_core::AssistantConfig;
use yojana_core::traits::{ChatHistory, SchemeStore};
use yojana_core::types::{AdvancedQuery, Language, SchemeRecord, SortOrder};
use yojana_speech::HttpSpeechProvider;
use yojana_store::{SqliteChatHistory, SqliteSchemeStore};

#[derive(Parser)]
#[command(name = "yojana", version, about = "🏛️  Government scheme assistant")]
struct Cli {
    /// Config file path (default: ~/.yojana/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Response language (en, hi, kn, ta, te, bn, gu, mr, pa)
    #[arg(short, long)]
    language: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a single question
    Ask {
        /// The question text
        query: String,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive chat session
    Chat,
    /// Ask by voice: transcribe an audio file and answer
    Voice {
        /// Path to the audio file
        audio: PathBuf,
        /// Write synthesized answer audio to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Search the scheme catalog with explicit filters
    Search {
        /// Sector filter (substring match)
        #[arg(long)]
        sector: Option<String>,
        /// Ministry filter (substring match)
        #[arg(long)]
        ministry: Option<String>,
        /// Eligibility text filter
        #[arg(long)]
        eligibility: Option<String>,
        /// Free-text keywords
        keywords: Vec<String>,
        /// Sort order: relevance, alphabetical, newest, oldest
        #[arg(long, default_value = "relevance")]
        sort: String,
    },
    /// Import scheme records from a JSON file
    Import {
        /// JSON file containing an array of scheme records
        file: PathBuf,
    },
    /// Show catalog statistics
    Stats,
    /// Show the turns of a chat session
    History {
        /// Session id
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "yojana=debug" } else { "yojana=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => AssistantConfig::load_from(path)?,
        None => AssistantConfig::load()?,
    };
    let language = cli
        .language
        .as_deref()
        .map(Language::from_code)
        .unwrap_or(config.default_language);

    let store = Arc::new(SqliteSchemeStore::open(&expand_path(&config.store.db_path))?);

    match cli.command {
        Command::Ask { query, json } => {
            let bot = build_bot(store, &config)?;
            let result = bot.process_query(&query, language, None).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.response.text);
            }
        }
        Command::Chat => {
            let bot = build_bot(store, &config)?;
            run_chat(&bot, language).await?;
        }
        Command::Voice { audio, out } => {
            let bot = build_bot(store, &config)?;
            let result = bot.process_voice_query(&audio, None).await;
            if let Some(heard) = &result.user_text {
                println!("🎤 Heard: {heard}");
            }
            println!("{}", result.text_response);
            if let Some(payload) = result.audio {
                match out {
                    Some(path) => {
                        std::fs::write(&path, &payload.data)?;
                        println!("🔊 Answer audio written to {} ({})", path.display(), payload.format);
                    }
                    None => {
                        println!("🔊 Answer audio ({}): {}", payload.format, BASE64.encode(&payload.data));
                    }
                }
            }
            if !result.success {
                std::process::exit(1);
            }
        }
        Command::Search { sector, ministry, eligibility, keywords, sort } => {
            let query = AdvancedQuery {
                sector,
                ministry,
                eligibility,
                keywords,
                sort: parse_sort(&sort),
                limit: 50,
            };
            let schemes = store.advanced_search(&query).await?;
            if schemes.is_empty() {
                println!("No schemes found.");
            }
            for scheme in &schemes {
                println!("• {} [{}]", scheme.title, scheme.sector);
                if !scheme.short_description.is_empty() {
                    println!("  {}", scheme.short_description);
                }
            }
        }
        Command::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let schemes: Vec<SchemeRecord> = serde_json::from_str(&content)?;
            let total = schemes.len();
            let mut imported = 0;
            for scheme in &schemes {
                match store.insert(scheme).await {
                    Ok(()) => imported += 1,
                    Err(e) => tracing::warn!("skipping scheme '{}': {e}", scheme.title),
                }
            }
            println!("✅ Imported {imported}/{total} schemes");
        }
        Command::Stats => {
            let stats = store.statistics().await?;
            println!("📊 Scheme catalog");
            println!("   Total:  {}", stats.total_schemes);
            println!("   Active: {}", stats.active_schemes);
            for (sector, count) in &stats.sectors {
                println!("   {:<20} {}", sector.display_name(), count);
            }
        }
        Command::History { session } => {
            let history = SqliteChatHistory::open(&expand_path(&config.history.db_path))?;
            let turns = history.session_history(&session).await?;
            if turns.is_empty() {
                println!("No turns for session {session}.");
            }
            for turn in &turns {
                println!("[{}] {}: {}", turn.timestamp.format("%H:%M:%S"), turn.role.as_str(), turn.text);
            }
        }
    }

    Ok(())
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

fn build_bot(store: Arc<SqliteSchemeStore>, config: &AssistantConfig) -> Result<Chatbot> {
    let mut bot = Chatbot::new(store as Arc<dyn SchemeStore>);
    if config.history.enabled {
        bot = bot.with_history(Arc::new(SqliteChatHistory::open(&expand_path(
            &config.history.db_path,
        ))?));
    }
    if config.speech.enabled {
        bot = bot.with_speech(Arc::new(HttpSpeechProvider::new(&config.speech)?));
    }
    Ok(bot)
}

fn parse_sort(sort: &str) -> SortOrder {
    match sort {
        "alphabetical" => SortOrder::Alphabetical,
        "newest" => SortOrder::Newest,
        "oldest" => SortOrder::Oldest,
        _ => SortOrder::Relevance,
    }
}

async fn run_chat(bot: &Chatbot, language: Language) -> Result<()> {
    let session_id = uuid::Uuid::new_v4().to_string();
    println!("🏛️  Yojana v{} — type 'exit' to quit", env!("CARGO_PKG_VERSION"));
    println!("   Session: {session_id}\n");

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == "exit" || query == "quit" {
            break;
        }
        let result = bot.process_query(query, language, Some(&session_id)).await;
        println!("\n{}\n", result.response.text);
    }
    println!("👋 Bye!");
    Ok(())
}
