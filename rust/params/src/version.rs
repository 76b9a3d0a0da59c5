//! Stack versions as shipped in `hostLevelParams/stack_version` and
//! `commandParams/version`, e.g. `2.2`, `2.2.1.0-2067` or `HDP-2.1`.

use std::{cmp::Ordering, fmt, str::FromStr};

use snafu::{OptionExt, Snafu};

const NORMALIZED_COMPONENTS: usize = 4;

/// A normalized stack version, compared component by component.
#[derive(Clone, Debug, Eq)]
pub struct StackVersion {
    components: Vec<u64>,
}

impl StackVersion {
    /// Normalizes `raw`, `None` if it is empty or not a dotted numeric version.
    ///
    /// A leading non-numeric prefix and a trailing `-<build>` suffix are dropped, and the
    /// result is padded to four components.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
        let release = trimmed.split('-').next().unwrap_or_default();
        if release.is_empty() {
            return None;
        }

        let mut components = release
            .split('.')
            .map(|component| component.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        if components.len() < NORMALIZED_COMPONENTS {
            components.resize(NORMALIZED_COMPONENTS, 0);
        }
        Some(StackVersion { components })
    }

    pub fn at_least(&self, threshold: &StackVersion) -> bool {
        self >= threshold
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or_default()
    }
}

/// Whether `version` parsed and is at least `threshold`.
///
/// Missing or malformed versions never meet a threshold, so they select the legacy layout.
pub fn meets(version: Option<&StackVersion>, threshold: &str) -> bool {
    match (version, StackVersion::parse(threshold)) {
        (Some(version), Some(threshold)) => version.at_least(&threshold),
        _ => false,
    }
}

impl Ord for StackVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|index| self.component(index).cmp(&other.component(index)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for StackVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StackVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl fmt::Display for StackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&rendered)
    }
}

#[derive(Snafu, Debug, PartialEq, Eq)]
#[snafu(display("{raw:?} is not a dotted numeric stack version"))]
pub struct MalformedVersion {
    raw: String,
}

impl FromStr for StackVersion {
    type Err = MalformedVersion;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        StackVersion::parse(raw).context(MalformedVersionSnafu { raw })
    }
}
