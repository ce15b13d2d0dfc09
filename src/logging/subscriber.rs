//! Tracing subscriber setup: console formatter and initialisation.
use super::logger::{DRY_RUN_TARGET, STAGE_TARGET};

/// Environment variable holding an [`EnvFilter`](tracing_subscriber::EnvFilter)
/// directive that overrides the verbosity flag.
pub const LOG_ENV: &str = "LOCKSMITH_STRATEGY_LOG";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that renders stage headers,
/// dry-run lines, and level-tagged warnings and errors.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;
        let ansi = writer.has_ansi_escapes();

        match level {
            tracing::Level::ERROR if ansi => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::ERROR => writeln!(writer, "ERROR {msg}"),
            tracing::Level::WARN if ansi => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::WARN => writeln!(writer, "WARN  {msg}"),
            tracing::Level::INFO if target == STAGE_TARGET => {
                if ansi {
                    writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
                } else {
                    writeln!(writer, "==> {msg}")
                }
            }
            tracing::Level::INFO if target == DRY_RUN_TARGET => {
                if ansi {
                    writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
                } else {
                    writeln!(writer, "  [DRY RUN] {msg}")
                }
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ if ansi => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
            _ => writeln!(writer, "  {msg}"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stderr so that command output on stdout (such as
/// `status --json`) stays machine readable.  The level is `debug` when
/// `verbose` is set and `info` otherwise, unless [`LOG_ENV`] holds a filter
/// directive.  Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use std::io::IsTerminal as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
