// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Intercepted request model, scope matching and credential extraction
//!
//! Both stages are synchronous and side-effect free.

mod extractor;
mod matcher;
mod request;

pub use extractor::{Credential, Extraction, Extractor};
pub use matcher::Matcher;
pub use request::InterceptedRequest;
