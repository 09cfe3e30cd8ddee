use chrono::{Local, NaiveTime};
use clap::Parser;
use solace_companion::{companion_prompt_with_memory, reply_or_fallback, OllamaClient};
use solace_core::SolaceConfig;
use solace_memory::FactStore;
use solace_monitor::{analyze, EventLog};
use solace_reminders::ReminderScheduler;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Solace — monitoring core for an elderly-companion device", long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "solace.toml")]
    config: PathBuf,

    /// Directory for the persisted stores (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Companion model name (overrides config)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = SolaceConfig::load_or_default(&args.config);
    if let Some(dir) = args.data_dir {
        config.stores.data_dir = dir;
    }
    if let Some(model) = args.model {
        config.companion.model = model;
    }

    info!(data_dir = %config.stores.data_dir.display(), "opening stores");
    let facts = FactStore::open(config.stores.facts_path());
    let event_log = EventLog::open(config.stores.event_log_path());
    let scheduler = Arc::new(Mutex::new(ReminderScheduler::new()));
    let companion = OllamaClient::from_config(&config.companion)?;
    let lexicon = config.lexicon.clone();

    spawn_reminder_poll(scheduler.clone());

    println!("Solace is listening. Type 'quit' to exit.");
    println!("Commands: facts, log, remind HH:MM <text>");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();

        if line.is_empty() {
            print!("> ");
            io::stdout().flush()?;
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        if line == "facts" {
            match facts.facts() {
                Ok(map) => println!("{}", serde_json::to_string_pretty(&map)?),
                Err(e) => println!("Couldn't read the facts store: {e}"),
            }
        } else if line == "log" {
            match event_log.read_all() {
                Ok(entries) => {
                    for record in entries.iter().rev().take(10).rev() {
                        println!(
                            "{}  {:?}  confusion={} emergency={}",
                            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                            record.report.sentiment,
                            record.report.confusion,
                            record.report.emergency,
                        );
                    }
                }
                Err(e) => println!("Couldn't read the event log: {e}"),
            }
        } else if let Some(rest) = line.strip_prefix("remind ") {
            match parse_remind(rest) {
                Some((time, text)) => {
                    scheduler.lock().await.add(text, time);
                    println!("Okay, I'll remind you every day at {time}.");
                }
                None => println!("Usage: remind HH:MM <text>"),
            }
        } else {
            let reply = handle_utterance(line, &lexicon, &event_log, &facts, &companion).await;
            println!("{reply}");
        }

        print!("> ");
        io::stdout().flush()?;
    }

    info!("goodbye");
    Ok(())
}

/// One chat turn: score the utterance, log the signal, learn facts,
/// then ask the companion for a reply with accumulated context.
async fn handle_utterance(
    utterance: &str,
    lexicon: &solace_core::Lexicon,
    event_log: &EventLog,
    facts: &FactStore,
    companion: &OllamaClient,
) -> String {
    let report = analyze(utterance, lexicon);
    if report.emergency {
        println!("That sounds urgent. If you need help right now, please call your emergency contact.");
    }
    if let Err(e) = event_log.record(report) {
        warn!("could not record signal: {e}");
    }
    if let Err(e) = facts.extract_facts(utterance) {
        warn!("could not persist extracted facts: {e}");
    }

    let prompt = companion_prompt_with_memory(&facts.render_facts(), utterance);
    reply_or_fallback(companion, &prompt).await
}

/// "HH:MM rest of text" -> (time, text), validating the clock shape.
fn parse_remind(rest: &str) -> Option<(&str, &str)> {
    let (time, text) = rest.split_once(' ')?;
    let text = text.trim();
    if text.is_empty() || NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return None;
    }
    Some((time, text))
}

/// Poll the scheduler once a minute; speak due reminders and reset the
/// spoken flags when the calendar day rolls over.
fn spawn_reminder_poll(scheduler: Arc<Mutex<ReminderScheduler>>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        let mut last_date = Local::now().date_naive();
        loop {
            interval.tick().await;
            let today = Local::now().date_naive();
            let due = {
                let mut scheduler = scheduler.lock().await;
                if today != last_date {
                    scheduler.reset_daily();
                }
                scheduler.due_at_local_now()
            };
            last_date = today;
            for text in due {
                println!("\nReminder: {text}");
                print!("> ");
                let _ = io::stdout().flush();
            }
        }
    });
}
