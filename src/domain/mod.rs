//! Domain logic - pure CalVer rules independent of any release backend

pub mod calver;
pub mod tag;

pub use calver::{next_release, next_tag, CalendarMonth, NextRelease, PatchChange};
pub use tag::{coerce_int, PreviousRelease, VersionTag, SENTINEL_TAG};
