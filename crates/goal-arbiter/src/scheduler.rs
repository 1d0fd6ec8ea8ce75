//! Goal arbitration.
//!
//! The [`Scheduler`] owns every goal of one agent, keeps exactly one of them
//! current, and on each [`tick`](Scheduler::tick) decides whether the current
//! goal keeps running, restarts, or hands over to the best eligible
//! alternative.

use std::fmt;

use tracing::debug;

use crate::builder::SchedulerBuilder;
use crate::snapshot::{GoalSnapshot, SchedulerSnapshot};
use crate::Goal;

/// Handle to a goal inside a [`Scheduler`].
///
/// Handles are issued by [`SchedulerBuilder`] in insertion order and stay
/// valid for the scheduler's lifetime, since goals are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalId(pub(crate) usize);

impl GoalId {
    /// Position of the goal in selection order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why the scheduler moved away from (or restarted) a goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
enum SwitchReason {
    Forced,
    Resolved,
    Ineligible,
}

/// Picks the active goal and drives it one tick at a time.
///
/// # Selection
///
/// When the current goal is resolved (or a switch is forced):
/// - A resolved goal that is repeatable for its outcome is reset and kept,
///   provided its prerequisite still holds
/// - Otherwise it is reset and replaced by the eligible goal with the
///   strictly highest weight, scanning in insertion order and skipping the
///   goal being replaced; the default goal seeds the scan, so it wins ties
///   and is the answer when nothing else is eligible
///
/// An unresolved goal is never preempted, even by a heavier one.
pub struct Scheduler<C> {
    goals: Vec<Goal<C>>,
    default_goal: GoalId,
    current: GoalId,
    ticks: u64,
}

impl<C> Scheduler<C> {
    pub fn builder() -> SchedulerBuilder<C> {
        SchedulerBuilder::new()
    }

    pub(crate) fn from_parts(goals: Vec<Goal<C>>, default_goal: GoalId) -> Self {
        Self {
            goals,
            default_goal,
            current: default_goal,
            ticks: 0,
        }
    }

    /// Selects the goal for this frame and advances it once.
    pub fn tick(&mut self, ctx: &mut C) {
        let id = self.select_goal(false, ctx);
        self.ticks += 1;
        let resolution = self.goals[id.0].advance(ctx);
        if resolution.is_resolved() {
            debug!(
                tick = self.ticks,
                goal = %self.goals[id.0].name,
                %resolution,
                "goal resolved"
            );
        }
    }

    /// Decides which goal is current and returns it.
    ///
    /// With `force_switch` the current goal is reset and replaced even if it
    /// is still unresolved or repeatable.
    pub fn select_goal(&mut self, force_switch: bool, ctx: &C) -> GoalId {
        let cur = self.current;
        let goal = &self.goals[cur.0];
        let resolution = goal.resolution;

        if force_switch {
            return self.switch_from(cur, SwitchReason::Forced, ctx);
        }
        if !resolution.is_resolved() {
            return cur;
        }
        if !goal.repeats_on(resolution) {
            return self.switch_from(cur, SwitchReason::Resolved, ctx);
        }

        let goal = &mut self.goals[cur.0];
        goal.reset();
        if !goal.conditions_met(ctx) {
            return self.switch_from(cur, SwitchReason::Ineligible, ctx);
        }
        debug!(goal = %goal.name, %resolution, "repeating goal");
        cur
    }

    /// Resets `cur` and makes the best eligible other goal current.
    fn switch_from(&mut self, cur: GoalId, reason: SwitchReason, ctx: &C) -> GoalId {
        self.goals[cur.0].reset();

        let mut best = self.default_goal;
        for (index, candidate) in self.goals.iter().enumerate() {
            if index == cur.0 {
                continue;
            }
            if candidate.weight > self.goals[best.0].weight
                && !candidate.offline
                && candidate.conditions_met(ctx)
            {
                best = GoalId(index);
            }
        }

        debug!(
            from = %self.goals[cur.0].name,
            to = %self.goals[best.0].name,
            %reason,
            "switching goal"
        );
        self.current = best;
        best
    }

    /// Resets every goal and falls back to the default goal.
    pub fn reset_all(&mut self) {
        for goal in &mut self.goals {
            goal.reset();
        }
        self.current = self.default_goal;
        self.ticks = 0;
        debug!(goal = %self.goals[self.default_goal.0].name, "scheduler reset");
    }

    #[inline]
    pub fn current_goal(&self) -> &Goal<C> {
        &self.goals[self.current.0]
    }

    #[inline]
    pub fn current_goal_id(&self) -> GoalId {
        self.current
    }

    #[inline]
    pub fn default_goal_id(&self) -> GoalId {
        self.default_goal
    }

    /// Returns the goal behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different scheduler with more goals.
    #[inline]
    pub fn goal(&self, id: GoalId) -> &Goal<C> {
        &self.goals[id.0]
    }

    /// Mutable access for host-side tweaks such as
    /// [`Goal::set_offline`] and [`Goal::set_weight`].
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different scheduler with more goals.
    #[inline]
    pub fn goal_mut(&mut self, id: GoalId) -> &mut Goal<C> {
        &mut self.goals[id.0]
    }

    /// Looks a goal up by name.
    pub fn goal_id(&self, name: &str) -> Option<GoalId> {
        self.goals
            .iter()
            .position(|goal| goal.name == name)
            .map(GoalId)
    }

    /// Iterates goals in selection order.
    pub fn goals(&self) -> impl Iterator<Item = (GoalId, &Goal<C>)> {
        self.goals
            .iter()
            .enumerate()
            .map(|(index, goal)| (GoalId(index), goal))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Always `false`; a scheduler holds at least its default goal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Ticks since construction or the last [`reset_all`](Self::reset_all).
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Captures a plain-data view of the scheduler for diagnostics.
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            tick: self.ticks,
            current: self.current_goal().name.clone(),
            default: self.goals[self.default_goal.0].name.clone(),
            goals: self
                .goals()
                .map(|(id, goal)| GoalSnapshot::capture(goal, id == self.current))
                .collect(),
        }
    }
}

impl<C> fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("current", &self.current)
            .field("default_goal", &self.default_goal)
            .field("ticks", &self.ticks)
            .field("goals", &self.goals)
            .finish()
    }
}
