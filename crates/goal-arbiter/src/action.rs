//! Action units and their failure handlers.
//!
//! An [`ActionUnit`] is one step of a goal: a primary [`Behavior`] paired with
//! a [`FailHandler`]. Once the primary behavior reports `Failed`, the unit
//! switches into [`ExecMode::Recovery`] and from then on only runs the
//! handler, every tick, until it is reset.

use std::fmt;

use tracing::{debug, trace};

use crate::{Behavior, ExecMode, FailureMark, Recovery, Status};

/// Wraps a recovery routine and normalises its result to a binary outcome.
///
/// # Semantics
///
/// - If the routine returns `Succeeded`, the handler returns `Succeeded`
/// - Anything else (including a contract-breaking `Ongoing`) becomes `Failed`
///
/// The handler keeps no state of its own between calls.
pub struct FailHandler<C> {
    recovery: Box<dyn Recovery<C>>,
}

impl<C> FailHandler<C> {
    pub fn new(recovery: impl Recovery<C> + 'static) -> Self {
        Self {
            recovery: Box::new(recovery),
        }
    }

    /// Runs the recovery routine once.
    pub fn execute(&mut self, ctx: &mut C) -> Status {
        let status = self.recovery.recover(ctx);
        if status.is_ongoing() {
            debug!("recovery returned ongoing; treating as failed");
        }
        status.or_failed()
    }
}

impl<C> fmt::Debug for FailHandler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailHandler").finish_non_exhaustive()
    }
}

/// A single behavior step with an attached recovery handler.
///
/// # State
///
/// - `mode`: which callback runs on the next [`execute`](Self::execute)
/// - `last_status`: outcome of the most recent `execute`, `Ongoing` initially
/// - `failure`: `Yes` once the unit switched to recovery
///
/// `mode` only goes `Primary -> Recovery`; only [`reset`](Self::reset) brings
/// it back.
pub struct ActionUnit<C> {
    behavior: Box<dyn Behavior<C>>,
    handler: FailHandler<C>,
    mode: ExecMode,
    last_status: Status,
    failure: FailureMark,
}

impl<C> ActionUnit<C> {
    pub fn new(
        behavior: impl Behavior<C> + 'static,
        recovery: impl Recovery<C> + 'static,
    ) -> Self {
        Self::with_handler(Box::new(behavior), FailHandler::new(recovery))
    }

    pub(crate) fn with_handler(behavior: Box<dyn Behavior<C>>, handler: FailHandler<C>) -> Self {
        Self {
            behavior,
            handler,
            mode: ExecMode::Primary,
            last_status: Status::Ongoing,
            failure: FailureMark::Unknown,
        }
    }

    /// Advances the unit by one step.
    ///
    /// Looks at the outcome of the previous call first: a `Failed` outcome
    /// flips the unit into recovery mode for good, a `Succeeded` outcome only
    /// records `FailureMark::No`. Then the callback selected by the mode runs
    /// and its result becomes the new `last_status`.
    pub fn execute(&mut self, ctx: &mut C) -> Status {
        match self.last_status {
            Status::Failed => {
                if self.mode == ExecMode::Primary {
                    debug!("action failed; switching to recovery");
                }
                self.mode = ExecMode::Recovery;
                self.failure = FailureMark::Yes;
            }
            Status::Succeeded => self.failure = FailureMark::No,
            Status::Ongoing => {}
        }

        let status = match self.mode {
            ExecMode::Primary => self.behavior.tick(ctx),
            ExecMode::Recovery => self.handler.execute(ctx),
        };
        trace!(mode = %self.mode, %status, "action executed");

        self.last_status = status;
        status
    }

    /// Returns the unit to its freshly built state.
    pub fn reset(&mut self) {
        self.mode = ExecMode::Primary;
        self.last_status = Status::Ongoing;
        self.failure = FailureMark::Unknown;
    }

    #[inline]
    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    #[inline]
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    #[inline]
    pub fn failure(&self) -> FailureMark {
        self.failure
    }
}

impl<C> fmt::Debug for ActionUnit<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionUnit")
            .field("mode", &self.mode)
            .field("last_status", &self.last_status)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GiveUp;

    #[derive(Default)]
    struct Calls {
        primary: u32,
        recovery: u32,
    }

    fn scripted(outcomes: Vec<Status>) -> impl FnMut(&mut Calls) -> Status {
        let mut iter = outcomes.into_iter();
        move |ctx: &mut Calls| {
            ctx.recovery += 1;
            iter.next().unwrap_or(Status::Succeeded)
        }
    }

    fn failing(ctx: &mut Calls) -> Status {
        ctx.primary += 1;
        Status::Failed
    }

    #[test]
    fn first_execute_runs_primary() {
        let mut unit = ActionUnit::new(
            |ctx: &mut Calls| {
                ctx.primary += 1;
                Status::Ongoing
            },
            GiveUp,
        );
        let mut ctx = Calls::default();

        assert_eq!(unit.execute(&mut ctx), Status::Ongoing);
        assert_eq!(ctx.primary, 1);
        assert_eq!(ctx.recovery, 0);
        assert_eq!(unit.mode(), ExecMode::Primary);
        assert_eq!(unit.failure(), FailureMark::Unknown);
    }

    #[test]
    fn failure_switches_to_recovery_and_stays() {
        let mut unit = ActionUnit::new(
            failing,
            scripted(vec![Status::Failed, Status::Failed, Status::Succeeded]),
        );
        let mut ctx = Calls::default();

        // Primary fails; the switch happens on the next call.
        assert_eq!(unit.execute(&mut ctx), Status::Failed);
        assert_eq!(unit.mode(), ExecMode::Primary);

        assert_eq!(unit.execute(&mut ctx), Status::Failed);
        assert_eq!(unit.mode(), ExecMode::Recovery);
        assert_eq!(unit.failure(), FailureMark::Yes);

        assert_eq!(unit.execute(&mut ctx), Status::Failed);
        assert_eq!(unit.execute(&mut ctx), Status::Succeeded);
        assert_eq!(unit.mode(), ExecMode::Recovery);

        // Still recovery after a success; primary never runs again.
        unit.execute(&mut ctx);
        assert_eq!(unit.mode(), ExecMode::Recovery);
        assert_eq!(unit.failure(), FailureMark::No);
        assert_eq!(ctx.primary, 1);
        assert_eq!(ctx.recovery, 4);
    }

    #[test]
    fn success_marks_no_failure() {
        let mut unit = ActionUnit::new(|_: &mut Calls| Status::Succeeded, GiveUp);
        let mut ctx = Calls::default();

        unit.execute(&mut ctx);
        assert_eq!(unit.failure(), FailureMark::Unknown);
        unit.execute(&mut ctx);
        assert_eq!(unit.failure(), FailureMark::No);
        assert_eq!(unit.mode(), ExecMode::Primary);
    }

    #[test]
    fn reset_restores_primary() {
        let mut unit = ActionUnit::new(failing, GiveUp);
        let mut ctx = Calls::default();

        unit.execute(&mut ctx);
        unit.execute(&mut ctx);
        assert_eq!(unit.mode(), ExecMode::Recovery);

        unit.reset();
        assert_eq!(unit.mode(), ExecMode::Primary);
        assert_eq!(unit.last_status(), Status::Ongoing);
        assert_eq!(unit.failure(), FailureMark::Unknown);

        unit.execute(&mut ctx);
        assert_eq!(ctx.primary, 2);
    }

    #[test]
    fn handler_coerces_ongoing_to_failed() {
        let mut handler = FailHandler::new(|_: &mut ()| Status::Ongoing);
        assert_eq!(handler.execute(&mut ()), Status::Failed);

        let mut handler = FailHandler::new(|_: &mut ()| Status::Succeeded);
        assert_eq!(handler.execute(&mut ()), Status::Succeeded);
    }
}
