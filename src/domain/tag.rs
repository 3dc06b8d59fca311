use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Tag string used for "no prior release"
pub const SENTINEL_TAG: &str = "0.0.0";

/// Calendar version `YEAR.MONTH.PATCH`
///
/// Fields are kept as parsed: no range checks are applied, so a month of 13
/// survives a parse/render round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionTag {
    pub year: i64,
    pub month: i64,
    pub patch: i64,
}

impl VersionTag {
    /// The triple the sentinel tag parses to
    pub const ZERO: VersionTag = VersionTag {
        year: 0,
        month: 0,
        patch: 0,
    };

    pub fn new(year: i64, month: i64, patch: i64) -> Self {
        VersionTag { year, month, patch }
    }

    /// Parse a tag string, degrading instead of failing.
    ///
    /// Only the first three `.`-separated segments are read. Each one goes
    /// through [`coerce_int`], so a missing or non-numeric segment becomes 0.
    ///
    /// ```
    /// use calver_release::domain::VersionTag;
    ///
    /// assert_eq!(VersionTag::parse("2025.1.5"), VersionTag::new(2025, 1, 5));
    /// assert_eq!(VersionTag::parse("v1.2.3"), VersionTag::new(0, 2, 3));
    /// assert_eq!(VersionTag::parse(""), VersionTag::ZERO);
    /// ```
    pub fn parse(tag: &str) -> Self {
        let mut segments = tag.splitn(4, '.');
        let mut next = || segments.next().map(coerce_int).unwrap_or(0);

        let year = next();
        let month = next();
        let patch = next();

        VersionTag { year, month, patch }
    }

    /// Whether `tag` is exactly three plain decimal segments
    pub fn is_well_formed(tag: &str) -> bool {
        let parts: Vec<&str> = tag.split('.').collect();
        parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    }

    /// Whether the month field is a calendar month
    pub fn has_valid_month(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    /// Whether this tag belongs to the given calendar month
    pub fn same_month(&self, year: i64, month: i64) -> bool {
        self.year == year && self.month == month
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.patch)
    }
}

/// Read a leading integer from `segment`, falling back to 0.
///
/// Leading whitespace is skipped and an optional sign is honoured; the first
/// run of ASCII digits is taken and anything after it is ignored. No digits,
/// or a value outside `i64`, yields 0.
pub fn coerce_int(segment: &str) -> i64 {
    leading_int()
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

fn leading_int() -> &'static Regex {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    // `\d` would also match non-ASCII digits
    LEADING_INT.get_or_init(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid leading-int regex"))
}

/// The release a new tag is computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousRelease {
    /// The repository has no release history
    FirstRelease,
    /// The latest release carries this tag
    Tagged(String),
}

impl PreviousRelease {
    /// Tag string as exposed to outputs and reports
    pub fn tag_name(&self) -> &str {
        match self {
            PreviousRelease::FirstRelease => SENTINEL_TAG,
            PreviousRelease::Tagged(tag) => tag,
        }
    }

    pub fn version(&self) -> VersionTag {
        match self {
            PreviousRelease::FirstRelease => VersionTag::ZERO,
            PreviousRelease::Tagged(tag) => VersionTag::parse(tag),
        }
    }
}
