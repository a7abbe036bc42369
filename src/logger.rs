use log::{Level, LevelFilter, Metadata, Record};

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Prints `LEVEL - message`; warnings and errors go to stderr.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Error | Level::Warn => eprintln!("{} - {}", record.level(), record.args()),
            Level::Debug | Level::Trace => {
                println!("{} [{}] - {}", record.level(), record.target(), record.args())
            }
            Level::Info => println!("{} - {}", record.level(), record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
