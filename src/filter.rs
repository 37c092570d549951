// File: src/filter.rs

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use crate::config::FilterConfig;
use crate::error::CleanError;
use crate::parsers::{self, json, LineOutcome};

/// Field inspected by the exclusion predicate.
pub const CITY_FIELD: &str = "city";
/// Lower-case marker of census ZCTA placeholder names.
pub const ZCTA_MARKER: &str = "zcta";

/// Counters for one pass over an input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub kept: usize,
    pub excluded: usize,
}

/// True when the record's city text contains "zcta", ignoring case.
/// Missing or non-string cities count as empty and are never excluded.
pub fn is_zcta_record(record: &Value) -> bool {
    parsers::text_or_default(record, CITY_FIELD, "")
        .to_lowercase()
        .contains(ZCTA_MARKER)
}

/// Copies every record of `reader` that is not a ZCTA record to `writer`.
///
/// Stops at the first malformed line; whatever was already written stays
/// written.
pub fn filter_stream<R, W>(reader: R, writer: &mut W) -> Result<FilterStats, CleanError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = FilterStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|source| CleanError::Read { line_number, source })?;
        stats.lines_read += 1;

        let record = match parsers::parse_record_line(&line) {
            Ok(LineOutcome::Blank) => {
                stats.blank_lines += 1;
                continue;
            }
            Ok(LineOutcome::Record(record)) => record,
            Err(source) => {
                return Err(CleanError::MalformedLine {
                    line_number,
                    line: line.trim().to_string(),
                    source,
                })
            }
        };

        if is_zcta_record(&record) {
            log::debug!(
                "Dropping line {}: city {:?}",
                line_number,
                parsers::text_or_default(&record, CITY_FIELD, "")
            );
            stats.excluded += 1;
            continue;
        }

        json::write_record_line(writer, &record).map_err(CleanError::write)?;
        stats.kept += 1;
    }

    Ok(stats)
}

/// Filters `config.input_path` into `config.output_path`.
///
/// The input is opened before the output is created, so a missing input never
/// leaves an empty output file behind.
pub fn run(config: &FilterConfig) -> Result<FilterStats, CleanError> {
    let input = File::open(&config.input_path).map_err(|source| CleanError::OpenInput {
        path: config.input_path.clone(),
        source,
    })?;
    let output = File::create(&config.output_path).map_err(|source| CleanError::CreateOutput {
        path: config.output_path.clone(),
        source,
    })?;

    let mut writer = BufWriter::new(output);
    let stats = filter_stream(BufReader::new(input), &mut writer)?;
    writer.flush().map_err(CleanError::write)?;

    log::info!(
        "Filtered {}: kept {}, dropped {} ZCTA records, skipped {} blank lines",
        config.input_path.display(),
        stats.kept,
        stats.excluded,
        stats.blank_lines
    );
    Ok(stats)
}

/// Status line printed once a run has finished.
pub fn completion_message(config: &FilterConfig) -> String {
    format!("Done. Output in: {}", config.output_path.display())
}
