use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "select_foods=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` directives are honoured on top of the crate default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
