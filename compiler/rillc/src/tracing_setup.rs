use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a global subscriber if `RILL_LOG` is set.
///
/// `RILL_LOG` holds `EnvFilter` directives, e.g. `rill_eval=debug` or
/// `rill_eval::limiter=trace`. With `RILL_LOG_TREE` also set, spans are
/// rendered as an indented call tree instead of flat lines.
///
/// Call this once at startup. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("RILL_LOG") else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));

        if std::env::var_os("RILL_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
