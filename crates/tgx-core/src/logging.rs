use crate::Result;

/// Install a `tracing` subscriber for an application embedding the SDK.
///
/// Only does something with the `tracing` feature enabled. `RUST_LOG` wins
/// over [`default_directives`]. Fails with [`crate::Error::Config`] when a
/// global subscriber is already set.
pub fn init(service_name: &str) -> Result<()> {
    let _ = service_name;

    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|e| crate::Error::Config(format!("tracing subscriber: {e}")))?;
    }

    Ok(())
}

/// SDK crates and the application at `info`, HTTP/bot dependencies at `warn`.
/// Per-send dispatch lines are `debug` and stay hidden.
pub fn default_directives(service_name: &str) -> String {
    // Targets are module paths, so crate names use underscores.
    let app = service_name.replace('-', "_");
    format!("warn,tgx_core=info,tgx_telegram=info,{app}=info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_use_module_path_names() {
        assert_eq!(
            default_directives("my-bot"),
            "warn,tgx_core=info,tgx_telegram=info,my_bot=info"
        );
    }

    #[test]
    fn init_does_not_panic() {
        // Second call may fail when a subscriber is already installed.
        let _ = init("tgx-test");
    }
}
