// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The capture-and-relay hook
//!
//! Wires matcher, extractor, local sink and relay together and decides when
//! the interception session is released.

mod clock;
mod coordinator;
mod guard;
mod pipeline;

pub use clock::{Clock, TokioClock};
pub use coordinator::{Coordinator, Phase};
pub use guard::{CompletionGuard, Passthrough, SessionHost};
pub use pipeline::{Capture, HookBuilder, InvocationReport, Outcome, TokenCaptureHook};
