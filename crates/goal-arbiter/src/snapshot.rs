//! Plain-data views of scheduler state for logs, UIs and tests.

use crate::{ExecMode, Goal, Resolution, Status};

/// State of every goal at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerSnapshot {
    /// Ticks run so far.
    pub tick: u64,
    /// Name of the current goal.
    pub current: String,
    /// Name of the default goal.
    pub default: String,
    /// Every goal, in selection order.
    pub goals: Vec<GoalSnapshot>,
}

impl SchedulerSnapshot {
    pub fn goal(&self, name: &str) -> Option<&GoalSnapshot> {
        self.goals.iter().find(|goal| goal.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalSnapshot {
    pub name: String,
    pub weight: i32,
    pub offline: bool,
    pub current: bool,
    pub cursor: usize,
    pub steps: usize,
    pub resolution: Resolution,
    /// Mode and last outcome of the step under the cursor.
    pub step_mode: ExecMode,
    pub step_status: Status,
}

impl GoalSnapshot {
    pub(crate) fn capture<C>(goal: &Goal<C>, current: bool) -> Self {
        let (step_mode, step_status) = goal
            .step(goal.cursor())
            .map(|step| (step.mode(), step.last_status()))
            .unwrap_or_default();

        Self {
            name: goal.name().to_owned(),
            weight: goal.weight(),
            offline: goal.is_offline(),
            current,
            cursor: goal.cursor(),
            steps: goal.len(),
            resolution: goal.resolution(),
            step_mode,
            step_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{GiveUp, Goal, Scheduler, Status};

    #[test]
    fn snapshot_reflects_progress() {
        let mut builder = Scheduler::builder();
        builder.default_goal(
            Goal::builder("idle")
                .step(|_: &mut ()| Status::Succeeded, GiveUp)
                .step(|_: &mut ()| Status::Ongoing, GiveUp)
                .build()
                .unwrap(),
        );
        let mut heavy = Goal::builder("heavy")
            .weight(3)
            .step(|_: &mut ()| Status::Ongoing, GiveUp)
            .build()
            .unwrap();
        heavy.set_offline(true);
        builder.goal(heavy);
        let mut scheduler = builder.build().unwrap();

        scheduler.tick(&mut ());
        let snapshot = scheduler.snapshot();

        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.current, "idle");
        assert_eq!(snapshot.default, "idle");

        let idle = snapshot.goal("idle").unwrap();
        assert!(idle.current);
        assert_eq!(idle.cursor, 1);
        assert_eq!(idle.steps, 2);
        assert_eq!(idle.step_status, Status::Ongoing);

        let heavy = snapshot.goal("heavy").unwrap();
        assert!(heavy.offline);
        assert!(!heavy.current);
        assert_eq!(heavy.weight, 3);
    }
}
