// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Four-part version number (`major.minor[.build[.revision]]`).

use std::fmt;
use std::str::FromStr;

/// Version with two mandatory and two optional trailing components.
///
/// A revision can only be present together with a build number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    pub const fn with_build(mut self, build: u32) -> Self {
        self.build = Some(build);
        self
    }

    /// Set the revision; implies a build number of 0 when none was set.
    pub const fn with_revision(mut self, revision: u32) -> Self {
        if self.build.is_none() {
            self.build = Some(0);
        }
        self.revision = Some(revision);
        self
    }

    pub const fn major(&self) -> u32 {
        self.major
    }

    pub const fn minor(&self) -> u32 {
        self.minor
    }

    pub const fn build(&self) -> Option<u32> {
        self.build
    }

    pub const fn revision(&self) -> Option<u32> {
        self.revision
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{revision}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|e| format!("'{part}': {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor)),
            [major, minor, build] => Ok(Self::new(*major, *minor).with_build(*build)),
            [major, minor, build, revision] => Ok(Self::new(*major, *minor)
                .with_build(*build)
                .with_revision(*revision)),
            _ => Err(format!("'{s}' must have 2 to 4 components")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for text in ["1.2", "1.2.3", "1.2.3.4"] {
            let version: Version = text.parse().expect("version should parse");
            assert_eq!(version.to_string(), text);
        }
        assert!("1".parse::<Version>().is_err());
        assert!("1.x".parse::<Version>().is_err());
    }

    #[test]
    fn revision_implies_build() {
        let version = Version::new(4, 0).with_revision(9);
        assert_eq!(version.build(), Some(0));
        assert_eq!(version.to_string(), "4.0.0.9");
    }
}
