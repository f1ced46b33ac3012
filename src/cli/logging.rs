//! Module implementing logging for the application.

use std::env;

use log::SetLoggerError;
use slog::{self, o, Drain, FilterLevel};
use slog_scope::GlobalLoggerGuard;


/// Initialize logging with given verbosity.
///
/// The returned guard must be kept alive for as long as logging is needed.
/// Filters from the RUST_LOG environment variable are applied on top of the verbosity.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let level = level_for(verbosity);

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();

    let mut builder = slog_envlogger::LogBuilder::new(drain).filter(None, level);
    if let Ok(ref filters) = env::var("RUST_LOG") {
        builder = builder.parse(filters);
    }
    let drain = slog_async::Async::new(builder.build().fuse()).build().fuse();

    let logger = slog::Logger::root(drain, o!());
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace)?;

    debug!("Logging initialized with level {:?}", level);
    Ok(guard)
}

/// Logging level that corresponds to given verbosity.
fn level_for(verbosity: isize) -> FilterLevel {
    match verbosity {
        v if v <= -2 => FilterLevel::Error,
        -1 => FilterLevel::Warning,
        0 => FilterLevel::Info,
        1 => FilterLevel::Debug,
        _ => FilterLevel::Trace,
    }
}


#[cfg(test)]
mod tests {
    use slog::FilterLevel;
    use super::level_for;

    #[test]
    fn verbosity_levels() {
        assert_eq!(FilterLevel::Error, level_for(-5));
        assert_eq!(FilterLevel::Error, level_for(-2));
        assert_eq!(FilterLevel::Warning, level_for(-1));
        assert_eq!(FilterLevel::Info, level_for(0));
        assert_eq!(FilterLevel::Debug, level_for(1));
        assert_eq!(FilterLevel::Trace, level_for(2));
        assert_eq!(FilterLevel::Trace, level_for(10));
    }
}
