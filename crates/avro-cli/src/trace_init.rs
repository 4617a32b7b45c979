//! Optional tracing output for `avrotool`, compiled in with the `trace` feature.

use std::path::Path;

/// Install a subscriber for the `avro_core` spans. With `log_dir` set, events
/// go to `avro-trace.jsonl` in that directory; otherwise to stderr.
/// `RUST_LOG` overrides the default `avro_core=debug` filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) {
    use std::sync::Once;

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("avro_core=debug"));

        match log_dir {
            Some(dir) => {
                // Written synchronously so nothing is lost when the tool exits.
                let appender = tracing_appender::rolling::never(dir, "avro-trace.jsonl");
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(appender)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
            }
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&Path>) {
    eprintln!("avrotool was built without the `trace` feature; tracing is disabled");
}
