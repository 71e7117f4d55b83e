use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the insn2yaml CLI.
///
/// Logs go to stderr only, so the output document is never affected. The
/// level can be raised through RUST_LOG, e.g. `RUST_LOG=insn2yaml_core=debug`.
pub fn init() -> Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Falls back to [`DEFAULT_FILTER`] when `directives` is absent or unparsable.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn missing_directives_use_default() {
        assert_eq!(build_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn explicit_directives_are_kept() {
        assert_eq!(
            build_filter(Some("insn2yaml_core=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
