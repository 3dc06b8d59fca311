use std::fmt;

/// Warnings about the previous release tag.
/// These are non-fatal: the run continues with the degraded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// Tag is not plain `YEAR.MONTH.PATCH`; unreadable fields were taken as 0
    UnrecognizedTag { tag: String },
    /// Tag parsed, but its month is not 1-12
    MonthOutOfRange { tag: String, month: i64 },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnrecognizedTag { tag } => {
                write!(
                    f,
                    "Previous tag '{}' is not in YEAR.MONTH.PATCH form; unreadable parts were treated as 0",
                    tag
                )
            }
            BoundaryWarning::MonthOutOfRange { tag, month } => {
                write!(f, "Previous tag '{}' has month {} outside 1-12", tag, month)
            }
        }
    }
}
