use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use odm::config::Config;
use odm::pipeline::Pipeline;
use odm::session::{RefreshStatus, Session};
use odm::translate::{GoogleTranslator, TargetLanguage, TranslationProvider, Translator};
use odm::ui;

/// Get the config file path (~/.config/odm/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("odm")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "odm", about = "Fashion news from RSS channels, with translated headlines")]
struct Args {
    /// Config file (default: ~/.config/odm/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Channel to read, by name or number
    #[arg(long, short)]
    channel: Option<String>,

    /// Maximum number of entries (10-50)
    #[arg(long, short)]
    limit: Option<u32>,

    /// Maximum entry age in days (1-30)
    #[arg(long, short)]
    days: Option<u32>,

    /// Keep titles in their original language
    #[arg(long)]
    no_translate: bool,

    /// List channels and exit
    #[arg(long)]
    list_channels: bool,

    /// Start an interactive session instead of a single refresh
    #[arg(long, short)]
    interactive: bool,

    /// Print the single refresh as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so listings can be piped
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to build HTTP client")?;

    let provider = match &config.translate_base_url {
        Some(base) => GoogleTranslator::with_base_url(client.clone(), base)
            .context("Invalid translate_base_url in config")?,
        None => GoogleTranslator::new(client.clone()),
    };
    let translator = Translator::new(provider, TargetLanguage::new(&config.target_language));
    let pipeline = Pipeline::new(client, config.user_agent.clone(), translator);
    let mut session = Session::from_config(pipeline, &config);

    if args.list_channels {
        print!("{}", ui::render_channels(session.channels(), session.channel()));
        return Ok(());
    }

    if let Some(key) = &args.channel {
        if session.select_channel(key).is_none() {
            anyhow::bail!("No channel named '{}' (see --list-channels)", key);
        }
    }
    if let Some(limit) = args.limit {
        session.set_item_limit(limit);
    }
    if let Some(days) = args.days {
        session.set_day_window(days);
    }
    if args.no_translate {
        session.set_translate(false);
    }

    if args.interactive {
        ui::run(&mut session).await?;
        return Ok(());
    }

    refresh_once(&mut session, args.json).await
}

async fn refresh_once<P: TranslationProvider>(session: &mut Session<P>, json: bool) -> Result<()> {
    let status = session
        .refresh()
        .await
        .with_context(|| format!("Failed to refresh {}", session.channel().name))?;

    if json {
        let body = serde_json::to_string_pretty(session.current())
            .context("Failed to serialize entries")?;
        println!("{}", body);
        return Ok(());
    }

    match status {
        RefreshStatus::Updated(_) => {
            println!("{}", session.channel().name);
            print!("{}", ui::render_entries(session.current()));
        }
        RefreshStatus::NothingNew => println!("{}", ui::NOTHING_NEW),
    }
    Ok(())
}
