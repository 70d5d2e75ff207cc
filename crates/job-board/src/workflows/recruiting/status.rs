use std::borrow::Cow;

use serde::Serialize;

use super::domain::{ApplicationStatus, JobStatus};

/// Color family for badges; the view layer maps it onto its own classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Yellow,
    Blue,
    Purple,
    Green,
    Red,
    Gray,
}

impl BadgeColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge<'a> {
    pub label: Cow<'a, str>,
    pub color: BadgeColor,
}

impl StatusBadge<'_> {
    pub fn into_owned(self) -> StatusBadge<'static> {
        StatusBadge {
            label: Cow::Owned(self.label.into_owned()),
            color: self.color,
        }
    }
}

impl ApplicationStatus {
    pub fn badge(&self) -> StatusBadge<'_> {
        let (label, color) = match self {
            Self::Pending => ("Pending Review", BadgeColor::Yellow),
            Self::UnderReview => ("Under Review", BadgeColor::Blue),
            Self::Shortlisted => ("Shortlisted", BadgeColor::Purple),
            Self::InterviewScheduled => ("Interview Scheduled", BadgeColor::Green),
            Self::Rejected => ("Rejected", BadgeColor::Red),
            Self::Other(raw) => {
                return StatusBadge {
                    label: Cow::Borrowed(raw.as_str()),
                    color: BadgeColor::Gray,
                }
            }
        };

        StatusBadge {
            label: Cow::Borrowed(label),
            color,
        }
    }
}

/// Badge for a raw status code as delivered by the backend.
pub fn status_badge(code: &str) -> StatusBadge<'static> {
    let status = ApplicationStatus::from_code(code);
    status.badge().into_owned()
}

impl JobStatus {
    pub fn badge(self) -> StatusBadge<'static> {
        let (label, color) = match self {
            Self::Active => ("Active", BadgeColor::Green),
            Self::Paused => ("Paused", BadgeColor::Yellow),
            Self::Closed => ("Closed", BadgeColor::Gray),
        };
        StatusBadge {
            label: Cow::Borrowed(label),
            color,
        }
    }
}

/// Banding of the 0-100 match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Excellent,
    Strong,
    Fair,
    Weak,
}

impl MatchBand {
    pub fn for_score(score: u32) -> Self {
        match score.min(100) {
            90.. => Self::Excellent,
            80..=89 => Self::Strong,
            70..=79 => Self::Fair,
            _ => Self::Weak,
        }
    }

    pub const fn color(self) -> BadgeColor {
        match self {
            Self::Excellent => BadgeColor::Green,
            Self::Strong => BadgeColor::Blue,
            Self::Fair => BadgeColor::Yellow,
            Self::Weak => BadgeColor::Red,
        }
    }
}
