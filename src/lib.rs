//! gh-outbound - Outbound license suggestions for GitHub dependencies
//!
//! Looks up the license of every dependency repository with the GitHub CLI,
//! caches the answers, and asks flict which licenses the combined work can
//! be released under.

pub mod cli;
pub mod config;
pub mod error;
pub mod flict;
pub mod github;
pub mod license;
pub mod pipeline;
pub mod process;

pub use error::{OutboundError, OutboundResult};
