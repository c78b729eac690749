//! Per-principal project visibility watch streams.
//!
//! A [`UserProjectWatcher`] maintains, for one authenticated principal, the set
//! of namespaces that principal may currently see, and publishes the
//! create/modify/delete transitions of that set as an ordered stream of
//! project events. Membership changes are delivered by an authorization
//! membership cache through a non-owning [`WatcherRegistry`]; the watcher
//! diffs each notification against its known visible set without re-scanning
//! the full namespace universe.
//!
//! The notification entry point is bounded: a watcher that cannot buffer an
//! event within a short grace window deregisters itself and terminates its
//! stream with a single error event, so one slow consumer can never stall the
//! shared dispatch path.

mod auth;
mod cache;
mod config;
mod errors;
mod metrics;
mod project;
mod selection;
mod watch;

pub use auth::*;
pub use cache::*;
pub use config::*;
pub use errors::*;
pub use metrics::*;
pub use project::*;
pub use selection::*;
pub use watch::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
