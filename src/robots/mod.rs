//! Robots.txt handling module
//!
//! This module provides robots.txt fetching, parsing and caching. The
//! [`RobotsGate`] is owned by the run loop and injected where a decision is
//! needed; there is no global cache. Unreachable policies fail open so that
//! a missing robots.txt never blocks a run, only a real Disallow does.

mod gate;
mod parser;

pub use gate::RobotsGate;
pub use parser::RobotsPolicy;
