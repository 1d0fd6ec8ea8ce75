//! Outcome and mode enums shared by actions, goals and the scheduler.

/// The result of executing one behavior step.
///
/// # Tick-driven Semantics
///
/// Work that spans several frames reports `Ongoing` until it is done:
/// - Conditions and instant actions resolve on their first call
/// - Long actions (e.g., "walk to the door") keep returning `Ongoing`
///
/// `Ongoing` is the default so that a freshly built step never looks like it
/// has already failed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    /// The behavior has not finished yet; call it again next tick.
    #[default]
    Ongoing,

    /// The behavior could not complete.
    Failed,

    /// The behavior completed.
    Succeeded,
}

impl Status {
    /// Returns `true` if this status is `Ongoing`.
    #[inline]
    pub fn is_ongoing(self) -> bool {
        matches!(self, Status::Ongoing)
    }

    /// Returns `true` if this status is `Failed`.
    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, Status::Failed)
    }

    /// Returns `true` if this status is `Succeeded`.
    #[inline]
    pub fn is_succeeded(self) -> bool {
        matches!(self, Status::Succeeded)
    }

    /// Returns `true` once the behavior has either failed or succeeded.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !self.is_ongoing()
    }

    /// Collapses the status into a binary outcome: anything but `Succeeded`
    /// becomes `Failed`.
    #[inline]
    pub fn or_failed(self) -> Self {
        match self {
            Status::Succeeded => Status::Succeeded,
            Status::Ongoing | Status::Failed => Status::Failed,
        }
    }
}

/// Which callback an [`ActionUnit`](crate::ActionUnit) currently runs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExecMode {
    /// The step's own behavior.
    #[default]
    Primary,
    /// The step's recovery handler. Sticky until reset.
    Recovery,
}

/// Whether an action has been observed failing since its last reset.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FailureMark {
    /// No resolved outcome has been observed yet.
    #[default]
    Unknown,
    /// The last observed outcome was a success.
    No,
    /// A failure was observed and the action switched to recovery.
    Yes,
}

/// Terminal state of a goal.
///
/// Transitions only `Unresolved -> Failed | Succeeded`; both resolved states
/// are absorbing until the goal is reset.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Resolution {
    #[default]
    Unresolved,
    Failed,
    Succeeded,
}

impl Resolution {
    /// Returns `true` for `Failed` and `Succeeded`.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

impl From<Status> for Resolution {
    fn from(status: Status) -> Self {
        match status {
            Status::Ongoing => Resolution::Unresolved,
            Status::Failed => Resolution::Failed,
            Status::Succeeded => Resolution::Succeeded,
        }
    }
}
