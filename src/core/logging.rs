use console::style;
use fern::Dispatch;
use log::LevelFilter;

/// Wire up the global logger. Every user-facing line goes through the
/// `log` macros, so this runs before anything worth printing happens.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };

    let dispatch = Dispatch::new()
        .format(|out, message, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            let level = format!("{:<5}", record.level());
            let level = match record.level() {
                log::Level::Error => style(level).red(),
                log::Level::Warn => style(level).yellow(),
                log::Level::Info => style(level).green(),
                log::Level::Debug | log::Level::Trace => style(level).dim(),
            };
            out.finish(format_args!("{} {} {}", style(timestamp).dim(), level, message))
        })
        .level(level)
        .chain(std::io::stdout());

    // Repeated initialization keeps the first logger; callers need not care
    let _ = dispatch.apply();
}
