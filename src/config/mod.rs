//! Configuration for the watch subsystem.
//!
//! Loading priority:
//! 1. Default values (hardcoded)
//! 2. Optional config file
//! 3. Environment variables (highest priority)

mod watch;
pub use watch::*;
