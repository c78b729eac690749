use crate::Project;
use crate::WatchError;

/// Kind of transition carried on a project watch stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Added,
    Modified,
    Deleted,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Added => "Added",
            EventKind::Modified => "Modified",
            EventKind::Deleted => "Deleted",
            EventKind::Error => "Error",
        }
    }
}

/// One transition of a principal's visible project set.
///
/// `Deleted` carries the last representation handed to the consumer, not the
/// current object. `Error` carries no object and terminates the stream.
#[derive(Debug, Clone)]
pub enum ProjectEvent {
    Added(Project),
    Modified(Project),
    Deleted(Project),
    Error(WatchError),
}

impl ProjectEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProjectEvent::Added(_) => EventKind::Added,
            ProjectEvent::Modified(_) => EventKind::Modified,
            ProjectEvent::Deleted(_) => EventKind::Deleted,
            ProjectEvent::Error(_) => EventKind::Error,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        match self {
            ProjectEvent::Added(project)
            | ProjectEvent::Modified(project)
            | ProjectEvent::Deleted(project) => Some(project),
            ProjectEvent::Error(_) => None,
        }
    }
}
