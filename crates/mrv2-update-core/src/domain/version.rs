//! Semantic version triple used to decide between upgrade, downgrade and reinstall.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::VersionParseError;

/// Matches the first `vMAJOR.MINOR.PATCH` occurrence inside a tag or file name.
static TAG_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+)\.(\d+)\.(\d+)").expect("tag version pattern is a valid regex")
});

/// An ordered `(major, minor, patch)` triple.
///
/// Ordering is component-wise, so `Version` can be compared directly
/// once parsed. Missing trailing components parse as zero, which makes
/// `0.8` and `0.8.0` equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted version such as `v1.2.3`, `1.2` or `3`.
    ///
    /// At most three numeric groups are accepted; an optional leading
    /// `v` is stripped first.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(VersionParseError::new(input));
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for group in body.split('.') {
            if count == parts.len() || group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(VersionParseError::new(input));
            }
            parts[count] = group
                .parse()
                .map_err(|_| VersionParseError::new(input))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Extract the first full `vX.Y.Z` version embedded in a release tag
    /// or asset file name (e.g. `mrv2-v1.2.3-Linux-amd64.deb`).
    pub fn from_tag(tag: &str) -> Result<Self, VersionParseError> {
        let caps = TAG_VERSION
            .captures(tag)
            .ok_or_else(|| VersionParseError::new(tag))?;
        let component = |i: usize| -> Result<u64, VersionParseError> {
            caps[i].parse().map_err(|_| VersionParseError::new(tag))
        };
        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Compare two version strings.
///
/// Both sides must parse; a malformed string is reported rather than
/// being compared as `0.0.0`.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionParseError> {
    Ok(Version::parse(a)?.cmp(&Version::parse(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_orderings() {
        assert_eq!(compare("0.8.2", "0.8.3").unwrap(), Ordering::Less);
        assert_eq!(compare("1.0.0", "0.9.9").unwrap(), Ordering::Greater);
        assert_eq!(compare("0.8", "0.8.0").unwrap(), Ordering::Equal);
        assert_eq!(compare("v1.1.0", "1.1.0").unwrap(), Ordering::Equal);
        assert_eq!(compare("1.10.0", "1.9.7").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetry_and_reflexivity() {
        let samples = [
            "0.1", "0.8", "0.8.0", "0.8.2", "0.8.3", "0.9.9", "1", "1.0.0", "1.2.10", "v2.0.1",
        ];
        for a in samples {
            assert_eq!(compare(a, a).unwrap(), Ordering::Equal, "reflexive for {a}");
            for b in samples {
                let ab = compare(a, b).unwrap();
                let ba = compare(b, a).unwrap();
                assert_eq!(ab, ba.reverse(), "antisymmetric for {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "v", "abc", "1..2", "1.2.3.4", "1.2.x", "-1.0.0", "1.2.3-rc1"] {
            assert!(Version::parse(bad).is_err(), "should reject {bad:?}");
        }
        let err = compare("1.0.0", "nightly").unwrap_err();
        assert_eq!(err.input, "nightly");
    }

    #[test]
    fn test_from_tag_finds_embedded_version() {
        assert_eq!(Version::from_tag("v1.3.2").unwrap(), Version::new(1, 3, 2));
        assert_eq!(
            Version::from_tag("mrv2-v0.9.4-Windows-amd64.exe").unwrap(),
            Version::new(0, 9, 4)
        );
        assert!(Version::from_tag("latest").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let v = Version::new(1, 0, 7);
        assert_eq!(v.to_string(), "1.0.7");
        assert_eq!("1.0.7".parse::<Version>().unwrap(), v);
    }
}
