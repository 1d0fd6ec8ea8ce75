//! Construction errors.
//!
//! Running goals never fails; every outcome is a [`Status`](crate::Status) or
//! [`Resolution`](crate::Resolution). Misconfigured topology is rejected here,
//! when goals and schedulers are built.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("goal name must not be blank")]
    EmptyGoalName,

    #[error("goal `{goal}` has no steps")]
    EmptyGoal { goal: String },

    #[error("step {step} of goal `{goal}` has no recovery handler")]
    MissingRecovery { goal: String, step: usize },

    #[error("goal `{goal}` binds a recovery handler without a pending step")]
    OrphanRecovery { goal: String },

    #[error("scheduler requires a default goal")]
    MissingDefaultGoal,

    #[error("default goal set twice (`{first}` and `{second}`)")]
    DuplicateDefaultGoal { first: String, second: String },

    #[error("goal name `{goal}` is used more than once")]
    DuplicateGoalName { goal: String },
}
