use crate::domain::{
    common::parse_template_version,
    entities::{Migration, Template},
    error::DomainError,
};

/// Centralized domain validation — thin delegation to entity methods so
/// callers have one place to look regardless of which entity changed shape.
pub struct DomainValidator;

impl DomainValidator {
    /// PEP-440-style downgrade refusal (§4.G): refuse when both commits
    /// parse as versions and the template would move backwards.
    pub fn validate_not_downgrade(
        from_commit: &str,
        to_commit: &str,
    ) -> Result<(), DomainError> {
        let (from, to) = match (
            parse_template_version(from_commit),
            parse_template_version(to_commit),
        ) {
            (Ok(f), Ok(t)) => (f, t),
            _ => return Ok(()), // non-version refs: nothing to compare
        };
        if from > to {
            return Err(DomainError::DowngradeRefused {
                from: from_commit.to_string(),
                to: to_commit.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_min_engine_version(
        template: &Template,
        engine_version: &str,
    ) -> Result<(), DomainError> {
        let Some(required) = &template.min_engine_version else {
            return Ok(());
        };
        // "0.0.0" denotes an editable/dev build of the engine: skip the gate.
        if engine_version == "0.0.0" {
            return Ok(());
        }
        let required_v =
            semver::Version::parse(required).map_err(|e| DomainError::InvalidVersion {
                value: required.clone(),
                reason: e.to_string(),
            })?;
        let actual_v =
            semver::Version::parse(engine_version).map_err(|e| DomainError::InvalidVersion {
                value: engine_version.to_string(),
                reason: e.to_string(),
            })?;
        if actual_v < required_v {
            return Err(DomainError::UnsupportedEngineVersion {
                required: required.clone(),
                actual: engine_version.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_migrations_parse(migrations: &[Migration]) -> Result<(), DomainError> {
        for m in migrations {
            semver::Version::parse(&m.version).map_err(|e| DomainError::InvalidVersion {
                value: m.version.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
