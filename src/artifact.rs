//! Artifact identity value types
//!
//! A baseline artifact is addressed by a `(group, name)` family key plus a
//! version. The string forms (`group:name` and `group:name:version`) double
//! as the map keys of the persisted acceptance config, so all three types
//! serialize to and from plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for artifact identifier strings without the expected
/// `:`-separated shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed artifact identifier {input:?}: expected {expected}")]
pub struct ParseIdentifierError {
    input: String,
    expected: &'static str,
}

impl ParseIdentifierError {
    fn new(input: &str, expected: &'static str) -> Self {
        Self {
            input: input.to_string(),
            expected,
        }
    }
}

/// A version identifier with exact string semantics.
///
/// Equality and ordering are plain string comparison; no semver parsing
/// happens here, so `"1.0"` and `"1.0.0"` are two different versions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `(group, name)` pair identifying an artifact family, without a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ArtifactKey {
    group: String,
    name: String,
}

impl ArtifactKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches a version to this family, producing a full coordinate.
    pub fn at_version(&self, version: VersionToken) -> ArtifactCoordinate {
        ArtifactCoordinate {
            key: self.clone(),
            version,
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for ArtifactKey {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "\"<group>:<name>\"";

        match s.split_once(':') {
            Some((group, name))
                if !group.is_empty() && !name.is_empty() && !name.contains(':') =>
            {
                Ok(Self::new(group, name))
            }
            _ => Err(ParseIdentifierError::new(s, EXPECTED)),
        }
    }
}

impl From<ArtifactKey> for String {
    fn from(key: ArtifactKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ArtifactKey {
    type Error = ParseIdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// An artifact family pinned to one specific version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ArtifactCoordinate {
    key: ArtifactKey,
    version: VersionToken,
}

impl ArtifactCoordinate {
    pub fn new(key: ArtifactKey, version: VersionToken) -> Self {
        Self { key, version }
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn version(&self) -> &VersionToken {
        &self.version
    }

    /// Returns a coordinate for the same family at a different version.
    pub fn with_version(&self, version: VersionToken) -> Self {
        Self {
            key: self.key.clone(),
            version,
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.version)
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "\"<group>:<name>:<version>\"";

        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(name), Some(version))
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(
                    ArtifactKey::new(group, name),
                    VersionToken::new(version),
                ))
            }
            _ => Err(ParseIdentifierError::new(s, EXPECTED)),
        }
    }
}

impl From<ArtifactCoordinate> for String {
    fn from(coordinate: ArtifactCoordinate) -> Self {
        coordinate.to_string()
    }
}

impl TryFrom<String> for ArtifactCoordinate {
    type Error = ParseIdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn version_ordering_is_lexicographic_not_numeric() {
        assert!(VersionToken::new("10.0") < VersionToken::new("9.0"));
        assert!(VersionToken::new("1.0") < VersionToken::new("1.0.0"));
        assert_ne!(VersionToken::new("1.0"), VersionToken::new("1.0.0"));
    }

    #[rstest]
    #[case("com.example:widgets", Some(("com.example", "widgets")))]
    #[case("g:n", Some(("g", "n")))]
    #[case("no-separator", None)]
    #[case(":name", None)]
    #[case("group:", None)]
    #[case("too:many:parts", None)]
    fn artifact_key_parse(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        let parsed = input.parse::<ArtifactKey>();
        match expected {
            Some((group, name)) => assert_eq!(parsed.unwrap(), ArtifactKey::new(group, name)),
            None => assert!(parsed.is_err()),
        }
    }

    #[rstest]
    #[case("com.example:widgets:1.0", Some(("com.example", "widgets", "1.0")))]
    #[case("g:n:2.0-rc1", Some(("g", "n", "2.0-rc1")))]
    #[case("g:n", None)]
    #[case("g:n:", None)]
    #[case("only-group", None)]
    fn artifact_coordinate_parse(
        #[case] input: &str,
        #[case] expected: Option<(&str, &str, &str)>,
    ) {
        let parsed = input.parse::<ArtifactCoordinate>();
        match expected {
            Some((group, name, version)) => assert_eq!(
                parsed.unwrap(),
                ArtifactKey::new(group, name).at_version(VersionToken::new(version))
            ),
            None => assert!(parsed.is_err()),
        }
    }

    #[test]
    fn coordinate_display_round_trips() {
        let coordinate = ArtifactKey::new("com.example", "widgets")
            .at_version(VersionToken::new("1.2.3"));

        let round_tripped = coordinate
            .to_string()
            .parse::<ArtifactCoordinate>()
            .unwrap();

        assert_eq!(round_tripped, coordinate);
    }

    #[test]
    fn with_version_keeps_the_family_key() {
        let original = ArtifactKey::new("g", "n").at_version(VersionToken::new("1.0"));
        let replaced = original.with_version(VersionToken::new("1.5"));

        assert_eq!(replaced.key(), original.key());
        assert_eq!(replaced.version(), &VersionToken::new("1.5"));
        assert_eq!(original.version(), &VersionToken::new("1.0"));
    }

    #[test]
    fn serializes_as_plain_strings() {
        let coordinate = ArtifactKey::new("g", "n").at_version(VersionToken::new("1.0"));

        assert_eq!(
            serde_json::to_string(&coordinate).unwrap(),
            r#""g:n:1.0""#
        );
        assert_eq!(
            serde_json::to_string(&VersionToken::new("1.0")).unwrap(),
            r#""1.0""#
        );
    }
}
