use tracing_subscriber::{EnvFilter, FmtSubscriber};

const FALLBACK_FILTER: &str = "info";

/// Logs go to stderr so stdout only carries the summary.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = filter_directive(verbose, |key| std::env::var(key).ok());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// `DIALOGUE_PROBE_LOG` wins over `RUST_LOG`; without either, `--verbose`
/// picks `debug` over `info`. Unparseable directives fall back to `info`.
fn filter_directive<F>(verbose: bool, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("DIALOGUE_PROBE_LOG").or_else(|| lookup("RUST_LOG")) {
        Some(value) if EnvFilter::try_new(&value).is_ok() => value,
        Some(_) => FALLBACK_FILTER.to_owned(),
        None if verbose => "debug".to_owned(),
        None => FALLBACK_FILTER.to_owned(),
    }
}
