//! Semantic version model and tag comparator
//!
//! Tags are projected onto [SemanticVersion] on demand. Anything that does not
//! look like `MAJOR.MINOR.PATCH[-PRE][+BUILD]` (optionally behind a `v`/`V`
//! or a configured prefix) is not a version and is silently left out.

use std::cmp::Ordering;
use std::fmt;

/// A semantic version parsed from a tag
///
/// Equality and ordering follow semver precedence: build metadata is ignored
/// and a prerelease sorts below the same version without one.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    inner: semver::Version,
}

impl SemanticVersion {
    /// Create a release version with no prerelease or build metadata
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemanticVersion {
            inner: semver::Version::new(major.into(), minor.into(), patch.into()),
        }
    }

    /// The fixed version proposed when a repository has no version tags
    pub fn initial() -> Self {
        SemanticVersion::new(1, 0, 0)
    }

    pub(crate) fn from_semver(inner: semver::Version) -> Self {
        SemanticVersion { inner }
    }

    pub(crate) fn as_semver(&self) -> &semver::Version {
        &self.inner
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Prerelease identifiers, e.g. `rc.1` for `1.2.0-rc.1`
    pub fn prerelease(&self) -> Option<&str> {
        (!self.inner.pre.is_empty()).then(|| self.inner.pre.as_str())
    }

    /// Build metadata, e.g. `sha.5114f85` for `1.2.0+sha.5114f85`
    pub fn build(&self) -> Option<&str> {
        (!self.inner.build.is_empty()).then(|| self.inner.build.as_str())
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.inner, &other.inner);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            // semver::Prerelease already orders EMPTY above any prerelease
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Parse a tag into a version, accepting an optional leading `v` or `V`.
///
/// Returns `None` for anything that is not a strict semantic version. Numeric
/// components larger than `u32::MAX` are rejected as well.
///
/// # Example
/// ```
/// use git_semtag::domain::version::{parse, SemanticVersion};
///
/// assert_eq!(parse("v1.2.3"), Some(SemanticVersion::new(1, 2, 3)));
/// assert_eq!(parse("garbage"), None);
/// ```
pub fn parse(tag: &str) -> Option<SemanticVersion> {
    parse_with_prefix(tag, "")
}

/// Parse a tag, first stripping `prefix` when the tag starts with it.
///
/// Exactly one prefix is removed: the configured one if present, otherwise
/// an optional `v`/`V`. `vv1.2.3` is therefore rejected under prefix `v`.
pub fn parse_with_prefix(tag: &str, prefix: &str) -> Option<SemanticVersion> {
    let body = match tag.strip_prefix(prefix).filter(|_| !prefix.is_empty()) {
        Some(rest) => rest,
        None => tag
            .strip_prefix(|c: char| c == 'v' || c == 'V')
            .unwrap_or(tag),
    };

    let inner = semver::Version::parse(body).ok()?;

    let limit = u64::from(u32::MAX);
    if inner.major > limit || inner.minor > limit || inner.patch > limit {
        return None;
    }

    Some(SemanticVersion { inner })
}

/// Compare two versions by semver precedence
pub fn compare(a: &SemanticVersion, b: &SemanticVersion) -> Ordering {
    a.cmp(b)
}

/// Select the highest version among `tags`, or `None` if no tag parses.
pub fn current_of<I, S>(tags: I) -> Option<SemanticVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    current_of_with_prefix(tags, "")
}

/// Like [current_of], stripping a configured tag prefix first.
///
/// Versions of equal precedence (differing only in build metadata) are
/// tie-broken on their full text so the result does not depend on the order
/// the repository lists its tags in.
pub fn current_of_with_prefix<I, S>(tags: I, prefix: &str) -> Option<SemanticVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| parse_with_prefix(tag.as_ref(), prefix))
        .max_by(|a, b| compare(a, b).then_with(|| a.inner.cmp(&b.inner)))
}
