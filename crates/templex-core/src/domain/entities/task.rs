//! `Task`: a post-render shell/argv command, and `Migration`, a version-gated
//! bundle of before/after tasks.

use std::collections::BTreeMap;

/// Either a shell line or an argv vector; both forms are rendered as
/// template strings (per element, for the argv form) before execution.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    Shell(String),
    Argv(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub command: TaskCommand,
    pub extra_env: BTreeMap<String, String>,
}

impl Task {
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            command: TaskCommand::Shell(command.into()),
            extra_env: BTreeMap::new(),
        }
    }

    pub fn argv(parts: Vec<String>) -> Self {
        Self {
            command: TaskCommand::Argv(parts),
            extra_env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env.insert(key.into(), value.into());
        self
    }
}

/// A version-gated bundle of tasks, selected by the stage they run in.
///
/// Applicability: `parsed(from) < parsed(migration.version) <= parsed(to)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub version: String,
    pub before: Vec<Task>,
    pub after: Vec<Task>,
}

impl Migration {
    /// True when this migration should run for an update spanning `from..=to`.
    pub fn applies(&self, from: &semver::Version, to: &semver::Version) -> Option<semver::Version> {
        let version = semver::Version::parse(&self.version).ok()?;
        if &version > from && &version <= to {
            Some(version)
        } else {
            None
        }
    }

    pub fn tasks_for_stage(&self, stage: MigrationStage) -> &[Task] {
        match stage {
            MigrationStage::Before => &self.before,
            MigrationStage::After => &self.after,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStage {
    Before,
    After,
}

impl MigrationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationStage::Before => "before",
            MigrationStage::After => "after",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> semver::Version {
        semver::Version::parse(s).unwrap()
    }

    #[test]
    fn migration_applies_within_open_closed_range() {
        let m = Migration {
            version: "1.2.0".into(),
            before: vec![],
            after: vec![],
        };
        assert!(m.applies(&v("1.0.0"), &v("1.2.0")).is_some());
        assert!(m.applies(&v("1.2.0"), &v("1.3.0")).is_none());
        assert!(m.applies(&v("1.3.0"), &v("1.4.0")).is_none());
    }

    #[test]
    fn migration_stage_str() {
        assert_eq!(MigrationStage::Before.as_str(), "before");
        assert_eq!(MigrationStage::After.as_str(), "after");
    }
}
