use std::path::PathBuf;
use std::time::Duration;

use booklist_engine::{FixtureOutcome, DEFAULT_LOAD_DELAY};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Fixture {
        delay: Duration,
        outcome: FixtureOutcome,
    },
    Http(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub state_dir: PathBuf,
    pub source: SourceConfig,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let state_dir = lookup("BOOKLIST_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let source = match lookup("BOOKLIST_SOURCE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => SourceConfig::Http(url),
            None => {
                let delay = lookup("BOOKLIST_LOAD_DELAY_MS")
                    .and_then(|ms| ms.trim().parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_LOAD_DELAY);
                let outcome = match lookup("BOOKLIST_SIMULATE_FAILURE").as_deref() {
                    Some("1" | "true" | "yes") => FixtureOutcome::Fail,
                    _ => FixtureOutcome::Succeed,
                };
                SourceConfig::Fixture { delay, outcome }
            }
        };

        let log_destination = lookup("BOOKLIST_LOG")
            .and_then(|raw| LogDestination::parse(&raw))
            .unwrap_or(LogDestination::File);

        Self {
            state_dir,
            source,
            log_destination,
            log_level: LevelFilter::Info,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("booklist.log")
    }
}
