use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG`, when set, replaces the
/// configured filter. Logs go to stderr; stdout carries the replay output.
pub fn init_tracing(log_filter: &str, json: bool) -> anyhow::Result<()> {
    let filter_directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| log_filter.to_string());

    let builder = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        let _ = init_tracing("law_firm=info", false);
        let err = init_tracing("law_firm=debug", true).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to install tracing subscriber"));
    }
}
