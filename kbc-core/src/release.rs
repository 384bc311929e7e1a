//! Release tag rules
//!
//! A push is publishable when the last segment of its git ref is a plain
//! `v?MAJOR.MINOR.PATCH` tag. Pre-release and build suffixes are not published.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

static SEMVER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("release tag pattern is valid")
});

/// Everything after the last `/` of a git ref (`refs/tags/v1.2.3` -> `v1.2.3`)
pub fn tag_from_ref(git_ref: &str) -> &str {
    match git_ref.rfind('/') {
        Some(pos) => &git_ref[pos + 1..],
        None => git_ref,
    }
}

/// Whether `tag` is exactly `v?MAJOR.MINOR.PATCH`
pub fn is_semver_tag(tag: &str) -> bool {
    SEMVER_TAG.is_match(tag)
}

/// Whether a push of `git_ref` should publish a release
pub fn should_publish(git_ref: &str) -> bool {
    is_semver_tag(tag_from_ref(git_ref))
}

/// A git ref that names a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    /// The tag as pushed, e.g. `v1.2.3`
    pub tag: String,
    pub version: Version,
}

impl ReleaseTag {
    /// Parse a full ref or a bare tag; `None` when it does not name a release
    pub fn parse(git_ref: &str) -> Option<Self> {
        let tag = tag_from_ref(git_ref);
        let captures = SEMVER_TAG.captures(tag)?;

        let component = |i: usize| -> Option<u64> { captures.get(i)?.as_str().parse().ok() };
        let version = Version::new(component(1)?, component(2)?, component(3)?);

        Some(Self {
            tag: tag.to_string(),
            version,
        })
    }
}

impl std::fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag)
    }
}
