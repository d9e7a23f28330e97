//! Diagnostic logging setup.
//!
//! Progress and warnings go through `tracing` to stderr so stdout stays
//! reserved for the command's inventory output. `RUST_LOG` overrides the
//! default filter; `--verbose` lowers it to debug.

use tracing_subscriber::EnvFilter;

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "leb_verses=debug"
    } else {
        "leb_verses=info"
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_lowers_filter() {
        assert_eq!(default_filter(false), "leb_verses=info");
        assert_eq!(default_filter(true), "leb_verses=debug");
    }
}
