use crate::Result;
use crate::tracking::Task;
use camino::Utf8Path;
use core::fmt::Formatter;
use ohno::{IntoAppError, bail};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;

const LOG_TARGET: &str = "    config";

/// The tasks declared in a YAML task file, ordered by name.
///
/// The file's top level is a mapping from task name to the command that reports the status
/// of that task's copy operation:
///
/// ```yaml
/// westeurope-images: az storage blob show --container-name images --name disk.vhd --query "[copy.progress, copy.status]" -o tsv
/// eastus-images: ./check-copy.sh eastus
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFile {
    tasks: Vec<Task>,
}

impl TaskFile {
    /// Read and validate a task file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a mapping of names to commands,
    /// or declares a task that is unnamed, duplicated, or has an empty command.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading task file from {path}"))?;
        let entries = Self::parse(&text).into_app_err_with(|| format!("parsing task file {path}"))?;
        let file = Self::from_entries(entries)?;

        if file.is_empty() {
            log::warn!(target: LOG_TARGET, "Task file {path} does not declare any tasks");
        } else {
            log::debug!(target: LOG_TARGET, "Loaded {} task(s) from {path}", file.len());
        }

        Ok(file)
    }

    fn parse(text: &str) -> core::result::Result<Vec<(String, String)>, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_yaml::from_str::<Entries>(text).map(|entries| entries.0)
    }

    fn from_entries(entries: Vec<(String, String)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(entries.len());

        for (name, command) in entries {
            if name.trim().is_empty() {
                bail!("task names must not be empty");
            }

            if command.trim().is_empty() {
                bail!("task '{name}' has an empty status command");
            }

            if !seen.insert(name.clone()) {
                bail!("task '{name}' is declared more than once");
            }

            tasks.push(Task::new(name, command));
        }

        tasks.sort();
        Ok(Self { tasks })
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Raw name/command pairs in document order, duplicates included.
struct Entries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_any(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("a mapping of task names to status commands")
    }

    fn visit_unit<E: serde::de::Error>(self) -> core::result::Result<Self::Value, E> {
        Ok(Entries(Vec::new()))
    }

    // A document holding only comments reads as a null value.
    fn visit_none<E: serde::de::Error>(self) -> core::result::Result<Self::Value, E> {
        Ok(Entries(Vec::new()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> core::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(entry) = map.next_entry::<String, String>()? {
            entries.push(entry);
        }

        Ok(Entries(entries))
    }
}
