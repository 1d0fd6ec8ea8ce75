//! Builders for goals and schedulers.
//!
//! Topology is fixed at construction time, so this is where configuration
//! mistakes are caught: a goal without steps, a step without a recovery
//! handler, a scheduler without a default goal. Errors are collected while
//! chaining and reported by `build()`.

use std::collections::HashSet;

use tracing::warn;

use crate::action::FailHandler;
use crate::error::{BuildError, Result};
use crate::scheduler::GoalId;
use crate::{ActionUnit, Always, Behavior, Goal, Prerequisite, Recovery, Resolution, Scheduler};

struct PendingStep<C> {
    behavior: Box<dyn Behavior<C>>,
    handler: Option<FailHandler<C>>,
}

/// Builder for [`Goal`].
///
/// Defaults: weight `0`, prerequisite always true, not repeatable, online.
///
/// # Example
///
/// ```rust
/// use goal_arbiter::{Goal, GiveUp, Status};
///
/// let goal = Goal::<()>::builder("wave")
///     .weight(3)
///     .repeatable_on_success(true)
///     .step(|_: &mut ()| Status::Succeeded, GiveUp)
///     .build()
///     .unwrap();
/// assert_eq!(goal.len(), 1);
/// ```
pub struct GoalBuilder<C> {
    name: String,
    steps: Vec<PendingStep<C>>,
    prerequisite: Box<dyn Prerequisite<C>>,
    weight: i32,
    repeatable_on_fail: bool,
    repeatable_on_success: bool,
    offline: bool,
    orphan_recovery: bool,
}

impl<C> GoalBuilder<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            prerequisite: Box::new(Always),
            weight: 0,
            repeatable_on_fail: false,
            repeatable_on_success: false,
            offline: false,
            orphan_recovery: false,
        }
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn prerequisite(mut self, prerequisite: impl Prerequisite<C> + 'static) -> Self {
        self.prerequisite = Box::new(prerequisite);
        self
    }

    /// Restart this goal after it fails instead of switching away.
    pub fn repeatable_on_fail(mut self, repeatable: bool) -> Self {
        self.repeatable_on_fail = repeatable;
        self
    }

    /// Restart this goal after it succeeds instead of switching away.
    pub fn repeatable_on_success(mut self, repeatable: bool) -> Self {
        self.repeatable_on_success = repeatable;
        self
    }

    /// Start the goal offline (excluded from selection).
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Appends a step with its recovery handler.
    pub fn step(
        mut self,
        behavior: impl Behavior<C> + 'static,
        recovery: impl Recovery<C> + 'static,
    ) -> Self {
        self.steps.push(PendingStep {
            behavior: Box::new(behavior),
            handler: Some(FailHandler::new(recovery)),
        });
        self
    }

    /// Appends a step whose recovery is bound by a following
    /// [`recover_with`](Self::recover_with).
    pub fn action(mut self, behavior: impl Behavior<C> + 'static) -> Self {
        self.steps.push(PendingStep {
            behavior: Box::new(behavior),
            handler: None,
        });
        self
    }

    /// Binds a recovery handler to the last step added with
    /// [`action`](Self::action).
    pub fn recover_with(mut self, recovery: impl Recovery<C> + 'static) -> Self {
        match self.steps.last_mut() {
            Some(step) if step.handler.is_none() => {
                step.handler = Some(FailHandler::new(recovery));
            }
            _ => self.orphan_recovery = true,
        }
        self
    }

    pub fn build(self) -> Result<Goal<C>> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyGoalName);
        }
        if self.orphan_recovery {
            return Err(BuildError::OrphanRecovery { goal: self.name });
        }
        if self.steps.is_empty() {
            return Err(BuildError::EmptyGoal { goal: self.name });
        }
        if let Some(step) = self.steps.iter().position(|s| s.handler.is_none()) {
            return Err(BuildError::MissingRecovery {
                goal: self.name,
                step,
            });
        }

        let steps = self
            .steps
            .into_iter()
            .filter_map(|step| {
                step.handler
                    .map(|handler| ActionUnit::with_handler(step.behavior, handler))
            })
            .collect();

        Ok(Goal {
            name: self.name,
            steps,
            cursor: 0,
            prerequisite: self.prerequisite,
            weight: self.weight,
            repeatable_on_fail: self.repeatable_on_fail,
            repeatable_on_success: self.repeatable_on_success,
            offline: self.offline,
            resolution: Resolution::Unresolved,
        })
    }
}

/// Builder for [`Scheduler`].
///
/// Goals keep the order in which they are added; that order breaks weight
/// ties during selection. The default goal is part of the list too.
pub struct SchedulerBuilder<C> {
    goals: Vec<Goal<C>>,
    default_goal: Option<GoalId>,
    duplicate_default: Option<BuildError>,
}

impl<C> Default for SchedulerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SchedulerBuilder<C> {
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            default_goal: None,
            duplicate_default: None,
        }
    }

    /// Adds a candidate goal and returns its handle.
    pub fn goal(&mut self, goal: Goal<C>) -> GoalId {
        let id = GoalId(self.goals.len());
        self.goals.push(goal);
        id
    }

    /// Adds the fallback goal and returns its handle.
    ///
    /// By convention the default goal has the lowest weight of all goals.
    pub fn default_goal(&mut self, goal: Goal<C>) -> GoalId {
        let id = self.goal(goal);
        match self.default_goal {
            Some(first) if self.duplicate_default.is_none() => {
                self.duplicate_default = Some(BuildError::DuplicateDefaultGoal {
                    first: self.goals[first.0].name.clone(),
                    second: self.goals[id.0].name.clone(),
                });
            }
            Some(_) => {}
            None => self.default_goal = Some(id),
        }
        id
    }

    pub fn build(self) -> Result<Scheduler<C>> {
        if let Some(err) = self.duplicate_default {
            return Err(err);
        }
        let default_goal = self.default_goal.ok_or(BuildError::MissingDefaultGoal)?;

        {
            let mut seen = HashSet::with_capacity(self.goals.len());
            for goal in &self.goals {
                if !seen.insert(goal.name.as_str()) {
                    return Err(BuildError::DuplicateGoalName {
                        goal: goal.name.clone(),
                    });
                }
            }
        }

        let fallback = &self.goals[default_goal.0];
        if let Some(lighter) = self
            .goals
            .iter()
            .find(|goal| goal.weight < fallback.weight)
        {
            warn!(
                default = %fallback.name,
                default_weight = fallback.weight,
                goal = %lighter.name,
                weight = lighter.weight,
                "default goal outweighs another goal; it will win selection over it"
            );
        }

        Ok(Scheduler::from_parts(self.goals, default_goal))
    }
}
