//! License key translation
//!
//! GitHub reports licenses with its own lowercase keys (`gh repo license list`,
//! see https://choosealicense.com/appendix). flict expects SPDX identifiers
//! with explicit `-only` suffixes for the copyleft families. Translation goes
//! GitHub key -> SPDX -> flict; a miss at either stage is a miss overall.

/// Map a GitHub license key to its SPDX identifier
pub fn github_to_spdx(key: &str) -> Option<&'static str> {
    let spdx = match key {
        "agpl-3.0" => "AGPL-3.0",
        "apache-2.0" => "Apache-2.0",
        "bsd-2-clause" => "BSD-2-Clause",
        "bsd-3-clause" => "BSD-3-Clause",
        "bsl-1.0" => "BSL-1.0",
        "cc0-1.0" => "CC0-1.0",
        "epl-2.0" => "EPL-2.0",
        "gpl-2.0" => "GPL-2.0",
        "gpl-3.0" => "GPL-3.0",
        "lgpl-2.1" => "LGPL-2.1",
        "mit" => "MIT",
        "mpl-2.0" => "MPL-2.0",
        "unlicense" => "Unlicense",
        _ => return None,
    };
    Some(spdx)
}

/// Map an SPDX identifier to the form flict understands
///
/// `CC0-1.0` has no flict counterpart.
pub fn spdx_to_flict(spdx: &str) -> Option<&'static str> {
    let flict = match spdx {
        "AGPL-3.0" => "AGPL-3.0-only",
        "Apache-2.0" => "Apache-2.0",
        "BSD-2-Clause" => "BSD-2-Clause",
        "BSD-3-Clause" => "BSD-3-Clause",
        "BSL-1.0" => "BSL-1.0",
        "EPL-2.0" => "EPL-2.0",
        "GPL-2.0" => "GPL-2.0-only",
        "GPL-3.0" => "GPL-3.0-only",
        "LGPL-2.1" => "LGPL-2.1-only",
        "MIT" => "MIT",
        "MPL-2.0" => "MPL-2.0",
        "Unlicense" => "Unlicense",
        _ => return None,
    };
    Some(flict)
}

/// Translate a GitHub license key straight to a flict identifier
pub fn github_to_flict(key: &str) -> Option<&'static str> {
    github_to_spdx(key).and_then(spdx_to_flict)
}
