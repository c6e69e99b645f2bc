use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Logger that writes one line per record to stdout.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        println!(
            "{:.3} [{}] [{:?}] {}:{} - {}",
            secs,
            record.level(),
            std::thread::current().id(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Install the stdout logger as the global `log` backend.
///
/// Safe to call more than once; later calls keep the first logger and only
/// adjust the max level.
pub fn init_stdout_logger(level: LevelFilter) {
    static LOGGER: StdoutLogger = StdoutLogger;
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
