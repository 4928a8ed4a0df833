//! Decomposition of declared version literals into their semantic-version
//! components.
//!
//! A declaration such as `"1.7.25"` becomes
//! `{ Major: ["1"], Minor: ["7"], Patch: ["25"] }`. Shorter literals (`"4"`,
//! `"4.13"`) are accepted and simply omit the missing components.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of a version component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemverKey {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

/// Component kind to component values. Consumers only read the first value
/// of each kind.
pub type VersionComponents = BTreeMap<SemverKey, Vec<String>>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid version `{literal}`: {reason}")]
pub struct VersionLiteralError {
    pub literal: String,
    pub reason: String,
}

impl VersionLiteralError {
    fn new(literal: &str, reason: impl Into<String>) -> Self {
        Self {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }
}

/// Split a version literal into its components.
///
/// Full `major.minor.patch[-pre][+build]` literals are validated by the
/// `semver` crate; one- and two-part literals are split by hand.
pub fn decompose(literal: &str) -> Result<VersionComponents, VersionLiteralError> {
    let literal = literal.trim();
    if literal.is_empty() {
        return Err(VersionLiteralError::new(literal, "empty version"));
    }

    let (rest, build) = match literal.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (literal, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let numbers: Vec<&str> = core.split('.').collect();
    if numbers.len() == 3 {
        let v = semver::Version::parse(literal)
            .map_err(|e| VersionLiteralError::new(literal, e.to_string()))?;
        let mut components = VersionComponents::new();
        components.insert(SemverKey::Major, vec![v.major.to_string()]);
        components.insert(SemverKey::Minor, vec![v.minor.to_string()]);
        components.insert(SemverKey::Patch, vec![v.patch.to_string()]);
        if !v.pre.is_empty() {
            components.insert(SemverKey::Prerelease, vec![v.pre.to_string()]);
        }
        if !v.build.is_empty() {
            components.insert(SemverKey::Build, vec![v.build.to_string()]);
        }
        return Ok(components);
    }

    if numbers.len() > 3 {
        return Err(VersionLiteralError::new(
            literal,
            "at most three numeric components are allowed",
        ));
    }
    for n in &numbers {
        if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionLiteralError::new(
                literal,
                format!("`{n}` is not a numeric component"),
            ));
        }
    }

    let mut components = VersionComponents::new();
    components.insert(SemverKey::Major, vec![numbers[0].to_string()]);
    if let Some(minor) = numbers.get(1) {
        components.insert(SemverKey::Minor, vec![minor.to_string()]);
    }
    for (key, value) in [(SemverKey::Prerelease, pre), (SemverKey::Build, build)] {
        match value {
            Some("") => {
                return Err(VersionLiteralError::new(
                    literal,
                    format!("empty {key:?} component").to_lowercase(),
                ));
            }
            Some(v) => {
                components.insert(key, vec![v.to_string()]);
            }
            None => {}
        }
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(c: &VersionComponents, key: SemverKey) -> Option<&str> {
        c.get(&key).and_then(|v| v.first()).map(String::as_str)
    }

    #[test]
    fn full_version_with_pre_and_build() {
        let c = decompose("1.2.3-rc.1+build.7").unwrap();
        assert_eq!(first(&c, SemverKey::Major), Some("1"));
        assert_eq!(first(&c, SemverKey::Minor), Some("2"));
        assert_eq!(first(&c, SemverKey::Patch), Some("3"));
        assert_eq!(first(&c, SemverKey::Prerelease), Some("rc.1"));
        assert_eq!(first(&c, SemverKey::Build), Some("build.7"));
    }

    #[test]
    fn two_part_version() {
        let c = decompose("4.13").unwrap();
        assert_eq!(first(&c, SemverKey::Major), Some("4"));
        assert_eq!(first(&c, SemverKey::Minor), Some("13"));
        assert!(!c.contains_key(&SemverKey::Patch));
    }

    #[test]
    fn major_only_with_prerelease() {
        let c = decompose("2-SNAPSHOT").unwrap();
        assert_eq!(first(&c, SemverKey::Major), Some("2"));
        assert_eq!(first(&c, SemverKey::Prerelease), Some("SNAPSHOT"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decompose("").is_err());
        assert!(decompose("latest").is_err());
        assert!(decompose("1.x").is_err());
        assert!(decompose("1.2.3.4").is_err());
        assert!(decompose("1.2-").is_err());
    }

    #[test]
    fn three_part_literal_goes_through_semver() {
        let err = decompose("1.2.x").unwrap_err();
        assert_eq!(err.literal, "1.2.x");
    }
}
