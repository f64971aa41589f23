//! JSON log output filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid. HTTP client internals are noisy
/// at `info`.
pub const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn";

pub(crate) fn filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install the global subscriber (no-op if one is already set).
pub fn init(default_directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_directives))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init(DEFAULT_DIRECTIVES);
        init("debug");
        ::tracing::info!(check = true, "subscriber installed");
    }

    #[test]
    fn default_directives_parse() {
        let rendered = EnvFilter::new(DEFAULT_DIRECTIVES).to_string();
        assert!(rendered.contains("reqwest=warn"));
    }
}
