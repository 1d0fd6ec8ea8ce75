//! Goals: ordered step sequences with eligibility and priority metadata.
//!
//! A [`Goal`] walks a cursor through its [`ActionUnit`]s, one `advance` per
//! tick, and folds the per-step outcomes into a goal-level [`Resolution`].

use std::fmt;

use tracing::{debug, trace};

use crate::builder::GoalBuilder;
use crate::{ActionUnit, FailureMark, Prerequisite, Resolution, Status};

/// One high-level objective of an agent.
///
/// # Semantics
///
/// Each [`advance`](Self::advance):
/// - Executes the step under the cursor once, unless it already succeeded
/// - If that step entered recovery, the goal resolves to `Failed`
/// - If that step succeeded, the cursor moves on and the next step runs in
///   the same call; after the last step the goal resolves to `Succeeded`
/// - Otherwise the goal stays `Unresolved` until the next tick
///
/// A goal is marked `Failed` as soon as one of its steps switches into
/// recovery, not when the recovery finishes. The recovery keeps running on
/// later `advance` calls for its side effects.
pub struct Goal<C> {
    pub(crate) name: String,
    pub(crate) steps: Vec<ActionUnit<C>>,
    pub(crate) cursor: usize,
    pub(crate) prerequisite: Box<dyn Prerequisite<C>>,
    pub(crate) weight: i32,
    pub(crate) repeatable_on_fail: bool,
    pub(crate) repeatable_on_success: bool,
    pub(crate) offline: bool,
    pub(crate) resolution: Resolution,
}

impl<C> Goal<C> {
    /// Starts building a goal with the given name.
    pub fn builder(name: impl Into<String>) -> GoalBuilder<C> {
        GoalBuilder::new(name)
    }

    /// Evaluates the prerequisite. Ignores the offline flag.
    pub fn conditions_met(&self, ctx: &C) -> bool {
        self.prerequisite.check(ctx)
    }

    /// Performs one tick of work and returns the goal's resolution afterwards.
    pub fn advance(&mut self, ctx: &mut C) -> Resolution {
        loop {
            let step = &mut self.steps[self.cursor];
            if step.last_status() != Status::Succeeded {
                step.execute(ctx);
            }

            if step.failure() == FailureMark::Yes {
                debug!(goal = %self.name, step = self.cursor, "goal failed");
                self.resolution = Resolution::Failed;
                break;
            }

            if step.last_status() == Status::Succeeded {
                if self.cursor + 1 == self.steps.len() {
                    debug!(goal = %self.name, "goal succeeded");
                    self.resolution = Resolution::Succeeded;
                    break;
                }
                self.cursor += 1;
                trace!(goal = %self.name, step = self.cursor, "next step");
                continue;
            }

            break;
        }

        self.resolution
    }

    /// Clears progress: resolution, cursor and every step.
    pub fn reset(&mut self) {
        self.resolution = Resolution::Unresolved;
        self.cursor = 0;
        for step in &mut self.steps {
            step.reset();
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Changes the priority. Takes effect at the next goal selection.
    #[inline]
    pub fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
    }

    #[inline]
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Excludes (or re-admits) the goal from selection.
    #[inline]
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    #[inline]
    pub fn repeatable_on_fail(&self) -> bool {
        self.repeatable_on_fail
    }

    #[inline]
    pub fn repeatable_on_success(&self) -> bool {
        self.repeatable_on_success
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Index of the step the next `advance` starts from.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; goals are built with at least one step.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&ActionUnit<C>> {
        self.steps.get(index)
    }

    /// Whether a resolved goal would be restarted rather than replaced.
    pub(crate) fn repeats_on(&self, resolution: Resolution) -> bool {
        match resolution {
            Resolution::Failed => self.repeatable_on_fail,
            Resolution::Succeeded => self.repeatable_on_success,
            Resolution::Unresolved => false,
        }
    }
}

impl<C> fmt::Debug for Goal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("offline", &self.offline)
            .field("cursor", &self.cursor)
            .field("resolution", &self.resolution)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
