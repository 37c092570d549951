pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod parsers;

// Re-export for easy access
pub use config::{CleanConfig, FilterConfig, IndexConfig};
pub use error::{CleanError, RecordError};
pub use filter::{filter_stream, is_zcta_record, FilterStats};
pub use index::{build_state_index, StateIndex};
pub use parsers::{parse_record_line, text_or_default, LineOutcome};
