//! Logger setup.

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// log4rs config read from the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {m}{n}";

/// Initialise log4rs from `config_file`, or log `info` to stdout if that fails.
pub fn init_logging(config_file: &str) -> Result<(), String> {
    let file_err = match log4rs::init_file(config_file, Default::default()) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| e.to_string())?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;

    log::warn!("{config_file} not loaded ({file_err}), using console defaults");
    Ok(())
}
