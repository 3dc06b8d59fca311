use chrono::Datelike;

use crate::domain::tag::VersionTag;

/// A calendar month in which a release is cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i64,
    pub month: i64,
}

impl CalendarMonth {
    pub fn new(year: i64, month: i64) -> Self {
        CalendarMonth { year, month }
    }

    /// Current month of the local wall clock
    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn from_date(date: impl Datelike) -> Self {
        CalendarMonth {
            year: i64::from(date.year()),
            month: i64::from(date.month()),
        }
    }
}

/// How the patch number moved between the previous and the next tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchChange {
    /// Same calendar month, patch bumped by one
    Incremented,
    /// New calendar month (or first release), patch restarted at 0
    Reset,
}

impl PatchChange {
    pub fn icon(&self) -> &'static str {
        match self {
            PatchChange::Incremented => "🔼",
            PatchChange::Reset => "🔄",
        }
    }
}

/// Next tag together with how it was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextRelease {
    pub tag: VersionTag,
    pub change: PatchChange,
}

/// Derive the next release from the previous tag and the current month.
///
/// Within the month of the previous release the patch is incremented; any
/// other month, including the `0.0` of the no-history sentinel, starts the
/// patch again at 0.
pub fn next_release(previous: &VersionTag, current: CalendarMonth) -> NextRelease {
    let (patch, change) = if previous.same_month(current.year, current.month) {
        (previous.patch.saturating_add(1), PatchChange::Incremented)
    } else {
        (0, PatchChange::Reset)
    };

    NextRelease {
        tag: VersionTag::new(current.year, current.month, patch),
        change,
    }
}

/// Next tag string for a release cut in `current_year`.`current_month`.
///
/// The month is not zero padded, so `2025.10.0` sorts before `2025.9.0` as a
/// string. Compare parsed [`VersionTag`]s instead.
///
/// ```
/// use calver_release::domain::{next_tag, VersionTag};
///
/// assert_eq!(next_tag(&VersionTag::new(2025, 1, 5), 2025, 1), "2025.1.6");
/// assert_eq!(next_tag(&VersionTag::new(2024, 12, 3), 2025, 1), "2025.1.0");
/// ```
pub fn next_tag(previous: &VersionTag, current_year: i64, current_month: i64) -> String {
    next_release(previous, CalendarMonth::new(current_year, current_month))
        .tag
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_month_increments_patch() {
        let next = next_release(&VersionTag::new(2025, 3, 2), CalendarMonth::new(2025, 3));
        assert_eq!(next.tag, VersionTag::new(2025, 3, 3));
        assert_eq!(next.change, PatchChange::Incremented);
    }

    #[test]
    fn test_new_month_resets_patch() {
        let next = next_release(&VersionTag::new(2025, 2, 9), CalendarMonth::new(2025, 3));
        assert_eq!(next.tag, VersionTag::new(2025, 3, 0));
        assert_eq!(next.change, PatchChange::Reset);
    }

    #[test]
    fn test_same_month_of_other_year_resets_patch() {
        assert_eq!(next_tag(&VersionTag::new(2024, 3, 4), 2025, 3), "2025.3.0");
    }

    #[test]
    fn test_sentinel_resets_patch() {
        assert_eq!(next_tag(&VersionTag::ZERO, 2025, 1), "2025.1.0");
    }

    #[test]
    fn test_patch_does_not_overflow() {
        let previous = VersionTag::new(2025, 1, i64::MAX);
        assert_eq!(
            next_release(&previous, CalendarMonth::new(2025, 1)).tag.patch,
            i64::MAX
        );
    }

    #[test]
    fn test_calendar_month_from_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(CalendarMonth::from_date(date), CalendarMonth::new(2025, 1));
    }

    #[test]
    fn test_patch_change_icons() {
        assert_eq!(PatchChange::Incremented.icon(), "🔼");
        assert_eq!(PatchChange::Reset.icon(), "🔄");
    }
}
