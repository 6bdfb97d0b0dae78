//! License resolution
//!
//! Turns repository identifiers into flict license identifiers:
//!
//! | Stage | Module | Notes |
//! |-------|--------|-------|
//! | Lookup | [`resolver`] | cache first, then `gh`, rate limited |
//! | Persist | [`cache`] | JSON lines, flushed once per run |
//! | Translate | [`mapping`] | GitHub key -> SPDX -> flict |

pub mod cache;
pub mod mapping;
pub mod record;
pub mod resolver;

pub use cache::{CacheGuard, LicenseCache};
pub use mapping::{github_to_flict, github_to_spdx, spdx_to_flict};
pub use record::{LicenseInfo, LicenseResult, UNKNOWN};
pub use resolver::{resolve_all, Resolution, ResolveOptions, Resolver, DEFAULT_INTERVAL};
