mod event;
mod project_watcher;
mod scope;

pub use event::*;
pub use project_watcher::*;
pub use scope::*;
