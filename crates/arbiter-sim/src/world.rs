//! The guard's world: a one-dimensional corridor and a few stimuli.
//!
//! Everything here is host-side behavior that the scheduler only sees as
//! opaque callbacks returning [`Status`].

use goal_arbiter::{Behavior, Status};
use tracing::debug;

/// Last reachable corridor cell; cell 0 is the guard post.
pub const CORRIDOR_END: i32 = 10;

/// Blackboard shared by every behavior and prerequisite.
#[derive(Debug, Default)]
pub struct World {
    pub frame: u64,
    pub position: i32,
    /// Corridor cell of an unexplained noise, if any.
    pub noise: Option<i32>,
    pub threat: bool,
    /// Human-readable log of what the guard did.
    pub events: Vec<String>,
}

impl World {
    pub fn note(&mut self, event: impl Into<String>) {
        let event = event.into();
        debug!(frame = self.frame, %event, "world event");
        self.events.push(event);
    }

    /// Moves one cell towards `target`.
    ///
    /// Returns `Failed` for cells outside the corridor, `Succeeded` once the
    /// guard stands on `target`.
    pub fn step_towards(&mut self, target: i32) -> Status {
        if !(0..=CORRIDOR_END).contains(&target) {
            return Status::Failed;
        }
        self.position += (target - self.position).signum();
        if self.position == target {
            Status::Succeeded
        } else {
            Status::Ongoing
        }
    }
}

/// Walks to a fixed corridor cell.
pub fn walk_to(target: i32) -> impl FnMut(&mut World) -> Status {
    move |world: &mut World| world.step_towards(target)
}

/// Walks to wherever the current noise came from.
pub fn walk_to_noise(world: &mut World) -> Status {
    match world.noise {
        Some(target) => world.step_towards(target),
        None => Status::Failed,
    }
}

/// Succeeds after being ticked `ticks` times.
///
/// Rewinds itself on completion so the owning goal can run it again after a
/// reset.
#[derive(Debug, Clone)]
pub struct Wait {
    ticks: u32,
    elapsed: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self {
            ticks: ticks.max(1),
            elapsed: 0,
        }
    }
}

impl Behavior<World> for Wait {
    fn tick(&mut self, _world: &mut World) -> Status {
        self.elapsed += 1;
        if self.elapsed >= self.ticks {
            self.elapsed = 0;
            Status::Succeeded
        } else {
            Status::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_towards_moves_one_cell() {
        let mut world = World::default();

        assert_eq!(world.step_towards(2), Status::Ongoing);
        assert_eq!(world.position, 1);
        assert_eq!(world.step_towards(2), Status::Succeeded);
        assert_eq!(world.step_towards(2), Status::Succeeded);
        assert_eq!(world.position, 2);
    }

    #[test]
    fn cells_outside_corridor_are_unreachable() {
        let mut world = World::default();

        assert_eq!(world.step_towards(CORRIDOR_END + 1), Status::Failed);
        assert_eq!(world.step_towards(-1), Status::Failed);
        assert_eq!(world.position, 0);
    }

    #[test]
    fn walk_to_noise_fails_without_noise() {
        let mut world = World::default();
        assert_eq!(walk_to_noise(&mut world), Status::Failed);

        world.noise = Some(1);
        assert_eq!(walk_to_noise(&mut world), Status::Succeeded);
    }

    #[test]
    fn wait_rewinds_after_completion() {
        let mut wait = Wait::new(2);
        let mut world = World::default();

        assert_eq!(wait.tick(&mut world), Status::Ongoing);
        assert_eq!(wait.tick(&mut world), Status::Succeeded);
        assert_eq!(wait.tick(&mut world), Status::Ongoing);
    }
}
