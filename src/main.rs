/*!
# Stellium - Daily Horoscopes and a Private Journal

Command-line front end for the stellium core: it composes the services
(file-backed storage, horoscope client, notification scheduler) into the
application state store and maps each subcommand onto one store operation.

## Usage

```
stellium horoscope [--sign <SIGN>]
stellium signs
stellium journal <add|list|edit|delete|clear> ...
stellium notify <enable|disable|time|status> ...
```

## Configuration

- `STELLIUM_DIR`: data directory (defaults to ~/.local/share/stellium)
- `STELLIUM_API_URL`: horoscope API base URL
- `RUST_LOG`: tracing filter (e.g. `stellium=debug`)
*/

use clap::Parser;
use std::sync::Arc;
use stellium::cli::{CliArgs, Command, JournalCommand, NotifyCommand};
use stellium::config::Config;
use stellium::errors::AppResult;
use stellium::horoscope::{HoroscopeClient, Source};
use stellium::journal::JournalRepository;
use stellium::notify::{LoggingBackend, NotificationScheduler};
use stellium::storage::FileStore;
use stellium::store::AppStore;
use stellium::zodiac::ZODIAC_SIGNS;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose {
        "stellium=debug"
    } else {
        "stellium=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stellium");
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load()?;
    config.validate()?;
    debug!(data_dir = %config.data_dir.display(), "Loaded configuration");

    // Composition root: one explicitly constructed instance of each service,
    // handed to the store by value.
    let storage = Arc::new(FileStore::open(&config.data_dir).await?);
    let backend = Arc::new(LoggingBackend::new());
    let mut store = AppStore::new(
        JournalRepository::new(storage.clone()),
        HoroscopeClient::new(config.api_url.clone()),
        NotificationScheduler::new(storage, backend.clone()),
    );

    match args.command {
        Command::Horoscope { sign } => {
            match sign {
                Some(sign) => store.set_zodiac_sign(&sign).await,
                None => store.fetch_horoscope().await,
            }
            fail_on_state_error(&store);

            if let Some(daily) = &store.state().current_horoscope {
                let h = &daily.horoscope;
                println!("{} - {}", h.sign, h.date);
                println!("{}", h.description);
                println!("Compatibility: {}", h.compatibility);
                println!("Mood: {}", h.mood);
                println!(
                    "Lucky number: {}  Lucky time: {}",
                    h.lucky_number, h.lucky_time
                );
                if daily.source == Source::Fallback {
                    println!("(offline fallback horoscope)");
                }
            }
        }

        Command::Signs => {
            for sign in &ZODIAC_SIGNS {
                println!(
                    "{} {:<12} {:<16} {:<6} {}",
                    sign.symbol, sign.name, sign.dates, sign.element, sign.quality
                );
            }
        }

        Command::Journal(command) => run_journal(&mut store, command).await,

        Command::Notify(command) => {
            run_notify(&mut store, command).await;
            if let Some((hour, minute)) = backend.active_schedule().await {
                println!("Active trigger: daily at {:02}:{:02}", hour, minute);
            }
        }
    }

    Ok(())
}

async fn run_journal(store: &mut AppStore, command: JournalCommand) {
    match command {
        JournalCommand::Add { content, mood } => {
            let id = store.save_journal_entry(&content, mood.as_deref()).await;
            fail_on_state_error(store);
            if let Some(id) = id {
                println!("Saved entry {}", id);
            }
        }

        JournalCommand::List => {
            store.load_journal_entries().await;
            let entries = &store.state().journal_entries;
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for entry in entries {
                let mood = entry.mood.as_deref().unwrap_or("-");
                println!("{}  {}  [{}]  {}", entry.date, entry.id, mood, entry.content);
            }
        }

        JournalCommand::Edit { id, content, mood } => {
            store.load_journal_entries().await;
            let known = store.state().journal_entries.iter().any(|e| e.id == id);
            store
                .update_journal_entry(&id, &content, mood.as_deref())
                .await;
            fail_on_state_error(store);
            if known {
                println!("Updated entry {}", id);
            } else {
                println!("No entry with id {}", id);
            }
        }

        JournalCommand::Delete { id } => {
            store.delete_journal_entry(&id).await;
            fail_on_state_error(store);
            println!("Deleted entry {}", id);
        }

        JournalCommand::Clear => {
            store.load_journal_entries().await;
            let count = store.state().journal_entries.len();
            store.clear_journal_entries().await;
            fail_on_state_error(store);
            println!("Cleared {} entries", count);
        }
    }
}

async fn run_notify(store: &mut AppStore, command: NotifyCommand) {
    match command {
        NotifyCommand::Enable { time } => {
            if store.enable_notifications(time.as_deref()).await {
                let time = store.state().notification_preferences.time.clone();
                println!("Daily reminder enabled at {}", time);
            } else {
                println!(
                    "Could not enable the reminder: notification permission was not granted."
                );
            }
        }

        NotifyCommand::Disable => {
            store.disable_notifications().await;
            println!("Daily reminder disabled.");
        }

        NotifyCommand::Time { time } => {
            if store.update_notification_time(&time).await {
                println!("Reminder time set to {}", time);
            } else {
                println!("'{}' is not a valid HH:mm time.", time);
            }
        }

        NotifyCommand::Status => {
            store.load_notification_preferences().await;
            let state = store.state();
            let prefs = &state.notification_preferences;
            println!(
                "enabled: {}  time: {}  dailyHoroscope: {}",
                prefs.enabled, prefs.time, prefs.daily_horoscope
            );
            println!("permission: {}", state.notification_permission);
        }
    }
}

/// Operations fold their failures into state as a user-facing message; for a
/// one-shot CLI run that message is the final word, so print it and exit
/// non-zero.
fn fail_on_state_error(store: &AppStore) {
    if let Some(message) = &store.state().error {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}
