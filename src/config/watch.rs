use std::time::Duration;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Tunables for a single project watch subscription
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// Capacity of the bounded queue between the diff engine and the run loop.
    /// A notification that cannot be buffered within the grace window is fatal
    /// for the watcher.
    #[serde(default = "default_incoming_queue_capacity")]
    pub incoming_queue_capacity: usize,

    /// Capacity of the outgoing event channel drained by the consumer
    #[serde(default = "default_outgoing_queue_capacity")]
    pub outgoing_queue_capacity: usize,

    /// Grace window (milliseconds) a membership notification may wait for
    /// queue space before the watcher declares backpressure overflow.
    /// Zero degrades to a pure non-blocking attempt.
    #[serde(default = "default_enqueue_grace_ms")]
    pub enqueue_grace_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            incoming_queue_capacity: default_incoming_queue_capacity(),
            outgoing_queue_capacity: default_outgoing_queue_capacity(),
            enqueue_grace_ms: default_enqueue_grace_ms(),
        }
    }
}

impl WatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.incoming_queue_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "incoming_queue_capacity must be greater than 0".into(),
            )));
        }

        if self.outgoing_queue_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "outgoing_queue_capacity must be greater than 0".into(),
            )));
        }

        Ok(())
    }

    /// Load configuration with priority: defaults, optional file,
    /// `PROJECT_WATCH`-prefixed environment variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PROJECT_WATCH")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: WatchConfig = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn enqueue_grace(&self) -> Duration {
        Duration::from_millis(self.enqueue_grace_ms)
    }
}

fn default_incoming_queue_capacity() -> usize {
    1000
}
fn default_outgoing_queue_capacity() -> usize {
    16
}
// in ms
fn default_enqueue_grace_ms() -> u64 {
    25
}
