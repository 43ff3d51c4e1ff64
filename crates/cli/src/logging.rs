use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compact log lines on stderr so stdout stays clean for JSON/CSV output.
/// `RUST_LOG` overrides the default filter.
pub fn init_cli_logger(verbose: bool) {
    // Prefix match: covers both the binary and namelink_linkage.
    let default = if verbose { "namelink=debug" } else { "namelink=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
