use crate::types::LogLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "FINSIGHT_LOG";

/// Install the stderr subscriber. An explicit level beats `FINSIGHT_LOG`,
/// which beats the `warn` default.
pub fn init(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(LevelFilter::from(level).into())
            .parse_lossy(""),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
