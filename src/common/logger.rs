use std::path::PathBuf;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::constants::{
    LOG_FILE_NAME, LOG_FILE_ROLL_COUNT, LOG_FILE_ROLL_SIZE, LOG_PATTERN, LOG_TARGET,
};
use super::errors::SpanIndexError;

pub static LOG4RS_HANDLE: Lazy<Mutex<Option<Handle>>> = Lazy::new(|| Mutex::new(None));

/// Settings for the log4rs backend behind the `log` facade.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory that receives the rolling log files.
    pub log_directory: PathBuf,
    /// One of `trace`, `debug`, `info`, `warn`, `error`, `off`.
    pub log_level: String,
    pub log_in_file: bool,
    pub console_display: bool,
    /// Only keep records whose target is this crate.
    pub only_record_span_index: bool,
}

impl LoggerConfig {
    pub fn new(
        log_directory: impl Into<PathBuf>,
        log_level: impl Into<String>,
        log_in_file: bool,
        console_display: bool,
        only_record_span_index: bool,
    ) -> Self {
        Self {
            log_directory: log_directory.into(),
            log_level: log_level.into(),
            log_in_file,
            console_display,
            only_record_span_index,
        }
    }

    fn level(&self) -> Result<LevelFilter, SpanIndexError> {
        self.log_level.parse::<LevelFilter>().map_err(|_| {
            SpanIndexError::InvalidArgument(format!("unknown log level `{}`", self.log_level))
        })
    }

    pub fn build_logger_config(&self) -> Result<Config, SpanIndexError> {
        let level = self.level()?;
        let mut appenders: Vec<&str> = Vec::new();
        let mut builder = Config::builder();

        if self.console_display {
            let console = ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build();
            builder = builder.appender(Appender::builder().build("console", Box::new(console)));
            appenders.push("console");
        }

        if self.log_in_file {
            let log_file = self.log_directory.join(LOG_FILE_NAME);
            let roll_pattern = self.log_directory.join(format!("{}.{{}}", LOG_FILE_NAME));
            let roller = FixedWindowRoller::builder()
                .build(&roll_pattern.to_string_lossy(), LOG_FILE_ROLL_COUNT)
                .map_err(|e| SpanIndexError::LoggerError(e.to_string()))?;
            let trigger = SizeTrigger::new(LOG_FILE_ROLL_SIZE);
            let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));
            let file = RollingFileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build(log_file, Box::new(policy))?;
            builder = builder.appender(Appender::builder().build("file", Box::new(file)));
            appenders.push("file");
        }

        let config = if self.only_record_span_index {
            let logger = Logger::builder()
                .appenders(appenders.clone())
                .additive(false)
                .build(LOG_TARGET, level);
            builder.logger(logger).build(Root::builder().build(LevelFilter::Off))
        } else {
            builder.build(Root::builder().appenders(appenders).build(level))
        };
        config.map_err(|e| SpanIndexError::LoggerError(e.to_string()))
    }
}

/// Install (or replace) the global logger.
pub fn init_logger(logger_config: &LoggerConfig) -> Result<(), SpanIndexError> {
    let config = logger_config.build_logger_config()?;
    let mut handle = LOG4RS_HANDLE.lock();
    if let Some(existing) = handle.as_ref() {
        existing.set_config(config);
        return Ok(());
    }
    let created =
        log4rs::init_config(config).map_err(|e| SpanIndexError::LoggerError(e.to_string()))?;
    *handle = Some(created);
    Ok(())
}
