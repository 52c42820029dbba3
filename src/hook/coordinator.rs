// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Completion state machine for one invocation
//!
//! ```text
//! Idle ──(credential, relay started)──> RelayPending
//! Idle ──(no match / no credential / detached relay)──> Done
//! RelayPending ──(relay settled)──> Settling
//! Settling ──(grace elapsed)──> Done
//! ```
//!
//! Entering `Done` releases the completion guard. The guard also fires if
//! the coordinator is dropped before reaching `Done`.

use std::time::Duration;

use super::clock::Clock;
use super::guard::CompletionGuard;

/// Coordinator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RelayPending,
    Settling,
    Done,
}

impl Phase {
    fn can_enter(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::RelayPending)
                | (Phase::Idle, Phase::Done)
                | (Phase::RelayPending, Phase::Settling)
                | (Phase::Settling, Phase::Done)
        )
    }
}

/// Drives one invocation to `Done`
#[derive(Debug)]
pub struct Coordinator {
    phase: Phase,
    history: Vec<Phase>,
    guard: Option<CompletionGuard>,
}

impl Coordinator {
    /// Start in `Idle`, holding the session guard
    pub fn new(guard: CompletionGuard) -> Self {
        Self {
            phase: Phase::Idle,
            history: vec![Phase::Idle],
            guard: Some(guard),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Every phase visited, in order
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Idle -> RelayPending
    pub fn relay_started(&mut self) {
        self.advance(Phase::RelayPending);
    }

    /// RelayPending -> Settling
    pub fn relay_settled(&mut self) {
        self.advance(Phase::Settling);
    }

    /// Settling -> Done, after `grace` has elapsed on `clock`
    pub async fn settle(&mut self, clock: &dyn Clock, grace: Duration) {
        if self.phase != Phase::Settling {
            tracing::warn!(phase = ?self.phase, "Grace delay requested outside Settling");
        }
        clock.sleep(grace).await;
        self.advance(Phase::Done);
    }

    /// Idle -> Done, releasing immediately
    pub fn finish(&mut self) {
        self.advance(Phase::Done);
    }

    /// Consume the coordinator, returning the visited phases
    pub fn into_history(mut self) -> Vec<Phase> {
        std::mem::take(&mut self.history)
    }

    fn advance(&mut self, next: Phase) {
        if !self.phase.can_enter(next) {
            tracing::warn!(from = ?self.phase, to = ?next, "Ignoring invalid completion transition");
            return;
        }
        self.phase = next;
        self.history.push(next);

        if next == Phase::Done {
            if let Some(guard) = self.guard.take() {
                guard.release();
            }
        }
    }
}
