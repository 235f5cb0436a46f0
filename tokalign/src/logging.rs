use log::{LevelFilter, debug};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

pub fn initialise_logging(log_level: LevelFilter) {
    if TermLogger::init(
        log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        debug!("Logger was already initialised");
    }
}
