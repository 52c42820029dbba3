// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Remote relay of captured credentials
//!
//! One authenticated POST per credential, single attempt, bounded by a
//! timeout. Every failure comes back as a [`RelayResult::Failure`]; nothing
//! escapes as an error to the interception session.

mod client;
mod envelope;

pub use client::{Relay, RelayClient, API_KEY_HEADER};
pub use envelope::{RelayEnvelope, RelayResult, RelaySubmission};
