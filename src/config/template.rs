//! Placeholder substitution for URL and boot parameter templates.
//!
//! Templates use `{name}` placeholders that are filled in at resolution time:
//!
//! - `url_template`: `{version}`, `{arch}`
//! - `boot_params`: `{base_url}`, `{version}`, `{arch}`
//!
//! iPXE runtime variables use `${name}` and pass through untouched, so
//! `console=${console}` survives substitution verbatim.
//!
//! # Example
//!
//! ```
//! use elfshoe::config::template::substitute;
//!
//! let url = substitute(
//!     "http://mirror/{version}/{arch}/os",
//!     &[("version", "41"), ("arch", "aarch64")],
//! );
//! assert_eq!(url, "http://mirror/41/aarch64/os");
//! ```

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Placeholders accepted by `url_template`.
pub const URL_PLACEHOLDERS: &[&str] = &["version", "arch"];

/// Placeholders accepted by `boot_params`.
pub const BOOT_PARAM_PLACEHOLDERS: &[&str] = &["base_url", "version", "arch"];

/// Matches `{name}` with an optional leading `$` so iPXE variables can be skipped.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\$?)\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("PLACEHOLDER_REGEX must compile")
});

/// List the placeholder names referenced by a template, in order of appearance.
///
/// `${name}` references are iPXE variables and are not reported.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter(|caps| caps[1].is_empty())
        .map(|caps| caps[2].to_string())
        .collect()
}

/// Return the placeholders of `template` that are not in `allowed`.
pub fn unknown_placeholders(template: &str, allowed: &[&str]) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|name| !allowed.contains(&name.as_str()))
        .collect()
}

/// Check whether a string still contains `{name}` placeholders.
pub fn has_placeholders(value: &str) -> bool {
    !placeholders(value).is_empty()
}

/// Replace `{name}` placeholders with values from `vars`.
///
/// Unknown placeholders and `${name}` iPXE variables are left as-is.
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            if !caps[1].is_empty() {
                return caps[0].to_string();
            }
            vars.iter()
                .find(|(key, _)| *key == &caps[2])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Join a base URL and a relative path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
