use core::fmt::{Display, Formatter};
use std::sync::Arc;

/// One tracked copy operation: a unique name and the command that reports its status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Task {
    name: Arc<str>,
    command: Arc<str>,
}

impl Task {
    pub fn new(name: impl Into<Arc<str>>, command: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub const fn name_arc(&self) -> &Arc<str> {
        &self.name
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name)
    }
}
