//! Guard scenario: goal set, stimuli schedule and the frame loop.

use goal_arbiter::{GiveUp, Goal, Scheduler, Status};
use tracing::info;

use crate::config::SimConfig;
use crate::world::{CORRIDOR_END, Wait, World, walk_to, walk_to_noise};

/// Builds the guard's goals.
///
/// | goal        | weight | eligible when    | steps                         |
/// |-------------|--------|------------------|-------------------------------|
/// | idle        | 0      | always (default) | stand watch                   |
/// | patrol      | 1      | no threat        | walk to end, walk back        |
/// | investigate | 5      | noise heard      | walk to noise, search, clear  |
/// | flee        | 10     | threat visible   | run to post, hide until safe  |
pub fn guard_scheduler() -> goal_arbiter::Result<Scheduler<World>> {
    let mut builder = Scheduler::builder();

    builder.default_goal(
        Goal::builder("idle")
            .weight(0)
            .step(Wait::new(2), GiveUp)
            .build()?,
    );

    builder.goal(
        Goal::builder("patrol")
            .weight(1)
            .prerequisite(|world: &World| !world.threat)
            .step(walk_to(CORRIDOR_END), GiveUp)
            .step(walk_to(0), GiveUp)
            .build()?,
    );

    builder.goal(
        Goal::builder("investigate")
            .weight(5)
            .prerequisite(|world: &World| world.noise.is_some())
            .action(walk_to_noise)
            .recover_with(|world: &mut World| {
                if let Some(target) = world.noise.take() {
                    world.note(format!("path to {target} blocked, reporting noise"));
                }
                Status::Succeeded
            })
            .step(Wait::new(2), GiveUp)
            .step(
                |world: &mut World| {
                    world.noise = None;
                    world.note("noise cleared");
                    Status::Succeeded
                },
                GiveUp,
            )
            .build()?,
    );

    builder.goal(
        Goal::builder("flee")
            .weight(10)
            .repeatable_on_fail(true)
            .prerequisite(|world: &World| world.threat)
            .step(walk_to(0), GiveUp)
            .step(
                |world: &mut World| {
                    if world.threat {
                        Status::Ongoing
                    } else {
                        world.note("threat gone");
                        Status::Succeeded
                    }
                },
                GiveUp,
            )
            .build()?,
    );

    builder.build()
}

/// One scripted run of the guard.
pub struct Simulation {
    config: SimConfig,
    scheduler: Scheduler<World>,
    world: World,
    timeline: Vec<(u64, String)>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> goal_arbiter::Result<Self> {
        Ok(Self {
            config,
            scheduler: guard_scheduler()?,
            world: World::default(),
            timeline: Vec::new(),
        })
    }

    /// Applies this frame's stimuli, then ticks the scheduler once.
    pub fn step(&mut self) {
        let frame = self.world.frame;

        if frame == self.config.noise_at {
            self.world.noise = Some(self.config.noise_pos);
            self.world.note(format!("noise at {}", self.config.noise_pos));
        }
        let threat = self.config.threat_visible(frame);
        if threat != self.world.threat {
            self.world.threat = threat;
            self.world
                .note(if threat { "threat spotted" } else { "threat left" });
        }

        let before = self.scheduler.current_goal_id();
        self.scheduler.tick(&mut self.world);
        let after = self.scheduler.current_goal_id();

        if before != after || self.timeline.is_empty() {
            let name = self.scheduler.current_goal().name().to_owned();
            info!(frame, goal = %name, position = self.world.position, "goal active");
            self.timeline.push((frame, name));
        }

        self.world.frame += 1;
    }

    pub fn run(&mut self) {
        for _ in 0..self.config.ticks {
            self.step();
        }
    }

    /// Frames at which a new goal became current, with its name.
    pub fn timeline(&self) -> &[(u64, String)] {
        &self.timeline
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scheduler(&self) -> &Scheduler<World> {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals_seen(sim: &Simulation) -> Vec<&str> {
        sim.timeline().iter().map(|(_, name)| name.as_str()).collect()
    }

    #[test]
    fn default_run_visits_every_goal() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.run();

        assert_eq!(
            goals_seen(&sim),
            vec!["idle", "patrol", "flee", "investigate", "patrol"]
        );
        assert_eq!(sim.world().noise, None);
        assert!(sim.world().events.iter().any(|e| e == "noise cleared"));
        assert!(sim.world().events.iter().any(|e| e == "threat gone"));
    }

    #[test]
    fn noise_waits_for_patrol_to_finish() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.run();

        // Noise is heard at frame 8, but patrol is only done at frame 20.
        let (patrol_start, _) = &sim.timeline()[1];
        let (flee_start, _) = &sim.timeline()[2];
        assert_eq!(*patrol_start, 2);
        assert_eq!(*flee_start, 21);
    }

    #[test]
    fn unreachable_noise_fails_investigation() {
        let config = SimConfig {
            ticks: 30,
            noise_pos: CORRIDOR_END + 5,
            threat_at: 1_000,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run();

        assert_eq!(
            goals_seen(&sim),
            vec!["idle", "patrol", "investigate", "patrol"]
        );
        assert_eq!(sim.world().noise, None);
        assert!(
            sim.world()
                .events
                .iter()
                .any(|e| e.contains("blocked, reporting noise"))
        );

        let investigate = sim.scheduler().goal_id("investigate").unwrap();
        assert_eq!(
            sim.scheduler().goal(investigate).resolution(),
            goal_arbiter::Resolution::Unresolved
        );
    }
}
