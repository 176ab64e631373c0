use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sevlog::{ingest, LogStore, Logged, SeverityTable, StoreWriter};

#[derive(Parser)]
#[command(name = "sevlog", about = "Severity-filtered logging into rotating files")]
struct Cli {
    /// Config file (TOML or JSON). Defaults to $SEVLOG_CONFIG, then ./sevlog.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/sevlog-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a single event.
    Log {
        #[arg(short, long, default_value = "INFO")]
        level: String,
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Read events from stdin, one per line. A leading level word overrides --level.
    Ingest {
        #[arg(short, long, default_value = "INFO")]
        level: String,
        /// Pending lines buffered ahead of the writer.
        #[arg(long, default_value_t = 1024)]
        queue: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sevlog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sevlog debug log started, tail -f /tmp/sevlog-debug.log");
    }

    let config = sevlog::config::Config::load(cli.config.as_deref())?;
    let severities = Arc::new(SeverityTable::standard());
    let store = sevlog::open_file_store(&config, severities.clone())?;

    match cli.command {
        Command::Log { level, message } => {
            if store.log(&message.join(" "), &level)? == Logged::Filtered {
                eprintln!("below threshold {}, not written", store.filter().threshold());
            }
        }
        Command::Ingest { level, queue } => {
            let default = severities.lookup(&level)?;
            let writer = StoreWriter::spawn(store, queue);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let summary = ingest::ingest(stdin, &writer.handle(), &severities, default).await?;
            writer.shutdown().await?;

            eprintln!(
                "stored {}, filtered {}, failed {}",
                summary.stored,
                summary.filtered,
                summary.failed()
            );
            if let Some(err) = summary.errors.first() {
                anyhow::bail!("{} line(s) not stored, first error: {err}", summary.failed());
            }
        }
    }
    Ok(())
}
