//! Project Watch Error Hierarchy
//!
//! Defines the error types for the watch subsystem, categorized by the layer
//! that produces them: selector parsing, cache access, and watch stream
//! lifecycle.

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration validation failures
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// Selector parsing failures
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// Cache access failures (seed listing)
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Watch stream lifecycle failures
    #[error(transparent)]
    Watch(#[from] WatchError),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectorError {
    /// Malformed selector term, expected `key=value`
    #[error("malformed selector term {term:?}")]
    MalformedTerm { term: String },

    /// Field selector key this object kind does not expose
    #[error("unsupported field selector key {key:?}")]
    UnsupportedField { key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Seed listing against the access cache failed; the watcher never starts
    #[error("listing visible namespaces for {principal:?} failed: {reason}")]
    SeedList { principal: String, reason: String },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchError {
    /// The watcher could not buffer a change within the grace window.
    /// Fatal: the watcher deregisters itself and terminates its stream.
    #[error("slow watcher, unable to buffer change to namespace {namespace:?}")]
    SlowWatcher { namespace: String },

    /// `start()` is single-use
    #[error("watcher already started")]
    AlreadyStarted,

    /// The output stream can only be claimed once
    #[error("output stream already claimed")]
    StreamClaimed,

    /// The watcher has been cancelled
    #[error("watcher stopped")]
    Stopped,
}
