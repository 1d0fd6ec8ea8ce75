//! Goal arbitration and action sequencing for tick-driven agents.
//!
//! This library decides what an agent (an NPC, a bot, a drone) is currently
//! trying to do and moves that objective forward one small step per frame.
//!
//! - **Host-driven**: no timers or threads; the host calls [`Scheduler::tick`]
//! - **Multi-tick steps**: a step returns [`Status::Ongoing`] until done
//! - **Sticky recovery**: a failed step runs its recovery handler from then on
//! - **Priority arbitration**: resolved goals hand over to the heaviest
//!   eligible goal, with a default goal as the fallback
//!
//! # Architecture
//!
//! - [`Status`]: Ongoing, Failed or Succeeded
//! - [`Behavior`], [`Recovery`], [`Prerequisite`]: host callback traits
//! - [`ActionUnit`] + [`FailHandler`]: one step and its recovery
//! - [`Goal`]: an ordered list of steps with weight and eligibility
//! - [`Scheduler`]: picks the current goal and advances it
//!
//! # Example
//!
//! ```rust
//! use goal_arbiter::{GiveUp, Goal, Scheduler, Status};
//!
//! struct Npc { hunger: u32 }
//!
//! let mut builder = Scheduler::builder();
//! builder.default_goal(
//!     Goal::builder("wander")
//!         .step(|_: &mut Npc| Status::Succeeded, GiveUp)
//!         .build()?,
//! );
//! let eat = builder.goal(
//!     Goal::builder("eat")
//!         .weight(5)
//!         .prerequisite(|npc: &Npc| npc.hunger > 3)
//!         .step(|npc: &mut Npc| { npc.hunger = 0; Status::Succeeded }, GiveUp)
//!         .build()?,
//! );
//! let mut scheduler = builder.build()?;
//!
//! let mut npc = Npc { hunger: 5 };
//! scheduler.tick(&mut npc); // wander completes
//! scheduler.tick(&mut npc); // hungry: switch to eat, which completes
//! assert_eq!(scheduler.current_goal_id(), eat);
//! assert_eq!(npc.hunger, 0);
//! # Ok::<(), goal_arbiter::BuildError>(())
//! ```

pub mod action;
pub mod behavior;
pub mod builder;
pub mod error;
pub mod goal;
pub mod scheduler;
pub mod snapshot;
pub mod status;

// Re-export core types for ergonomic API
pub use action::{ActionUnit, FailHandler};
pub use behavior::{Always, Behavior, GiveUp, Prerequisite, Recovery};
pub use builder::{GoalBuilder, SchedulerBuilder};
pub use error::{BuildError, Result};
pub use goal::Goal;
pub use scheduler::{GoalId, Scheduler};
pub use snapshot::{GoalSnapshot, SchedulerSnapshot};
pub use status::{ExecMode, FailureMark, Resolution, Status};
