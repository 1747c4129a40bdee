use std::path::PathBuf;

use crate::options::LintOptions;

/// Cache file used when neither `--cache-file` nor `--cache-location` is
/// given, resolved against the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".parlintcache";

/// Resolve where the engine's result cache lives.
///
/// Precedence: explicit cache file > explicit cache location > default name
/// in the working directory. A location naming an existing directory means
/// "the default file inside it".
#[must_use]
pub fn resolve_cache_path(options: &LintOptions) -> PathBuf {
    let configured = options
        .cache_file
        .clone()
        .or_else(|| options.cache_location.clone());

    let path = configured.map_or_else(
        || options.cwd.join(DEFAULT_CACHE_FILE),
        |p| {
            if p.is_absolute() {
                p
            } else {
                options.cwd.join(p)
            }
        },
    );

    if path.is_dir() {
        path.join(DEFAULT_CACHE_FILE)
    } else {
        path
    }
}

/// Whether a persistent analysis cache already exists.
///
/// Cached runs are assumed cheap enough that fan-out overhead is not worth
/// paying, so this gates the partitioning decision. Any filesystem error is
/// treated as "no cache"; this probe never fails.
#[must_use]
pub fn has_cache(options: &LintOptions) -> bool {
    resolve_cache_path(options).try_exists().unwrap_or(false)
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
