/// Log target shared by every record this crate emits.
pub const LOG_TARGET: &str = "span_index";

pub const LOG_FILE_NAME: &str = "span_index.log";
pub const LOG_FILE_ROLL_SIZE: u64 = 64 * 1024 * 1024;
pub const LOG_FILE_ROLL_COUNT: u32 = 8;
pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} [{T}] {t} - {m}{n}";

pub const SPAN_SEARCH_CONFIG_FILE: &str = "span_search_config.json";

pub const DEFAULT_BOOST: f32 = 1.0;
pub const DEFAULT_MAX_CLAUSE_COUNT: usize = 1024;
pub const DEFAULT_TOP_K: usize = 10;
