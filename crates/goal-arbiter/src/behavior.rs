//! Host callback traits.
//!
//! This module defines the three seams through which the host plugs game
//! logic into the engine: [`Behavior`] (one step of work), [`Recovery`]
//! (what to do after that step failed) and [`Prerequisite`] (whether a goal
//! may be picked). All are generic over a context type `C`, the host's
//! blackboard, which the engine passes through untouched.
//!
//! Closures implement every trait, so most hosts never name them:
//!
//! ```rust
//! use goal_arbiter::{Behavior, Status};
//!
//! let mut steps_left = 2;
//! let mut walk = move |_: &mut ()| {
//!     steps_left -= 1;
//!     if steps_left == 0 { Status::Succeeded } else { Status::Ongoing }
//! };
//! assert_eq!(walk.tick(&mut ()), Status::Ongoing);
//! assert_eq!(walk.tick(&mut ()), Status::Succeeded);
//! ```

use crate::Status;

/// A single behavior step, called once per tick until it resolves.
pub trait Behavior<C> {
    /// Run one slice of the behavior.
    ///
    /// # Returns
    ///
    /// - `Status::Ongoing` if more ticks are needed
    /// - `Status::Failed` if the behavior gave up
    /// - `Status::Succeeded` if the behavior is done
    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// A recovery routine run after a behavior failed.
///
/// Implementations are expected to return only `Failed` or `Succeeded`;
/// [`FailHandler`](crate::FailHandler) coerces anything else to `Failed`.
pub trait Recovery<C> {
    fn recover(&mut self, ctx: &mut C) -> Status;
}

/// Eligibility predicate for a goal.
pub trait Prerequisite<C> {
    fn check(&self, ctx: &C) -> bool;
}

impl<C, F> Behavior<C> for F
where
    F: FnMut(&mut C) -> Status,
{
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        self(ctx)
    }
}

impl<C, F> Recovery<C> for F
where
    F: FnMut(&mut C) -> Status,
{
    #[inline]
    fn recover(&mut self, ctx: &mut C) -> Status {
        self(ctx)
    }
}

impl<C, F> Prerequisite<C> for F
where
    F: Fn(&C) -> bool,
{
    #[inline]
    fn check(&self, ctx: &C) -> bool {
        self(ctx)
    }
}

/// A recovery that gives up immediately.
///
/// Useful for steps whose failure needs no cleanup.
#[derive(Debug, Default, Clone, Copy)]
pub struct GiveUp;

impl<C> Recovery<C> for GiveUp {
    #[inline]
    fn recover(&mut self, _ctx: &mut C) -> Status {
        Status::Failed
    }
}

/// A prerequisite that always holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct Always;

impl<C> Prerequisite<C> for Always {
    #[inline]
    fn check(&self, _ctx: &C) -> bool {
        true
    }
}
