// File: src/index.rs

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::sync::OnceLock;

use crate::config::IndexConfig;
use crate::error::CleanError;
use crate::parsers::{self, LineOutcome};

/// One state in the index, keyed by its slugged name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateEntry {
    pub name: String,
    pub cities: Vec<CityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityEntry {
    pub name: String,
    pub slug: String,
    pub county: Option<String>,
}

pub type StateIndex = BTreeMap<String, StateEntry>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Records carrying both a city and a state.
    pub cities_parsed: usize,
    pub malformed_lines: usize,
    pub states: usize,
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn slug_strip_regex() -> &'static Regex {
    static SLUG_STRIP_REGEX: OnceLock<Regex> = OnceLock::new();
    SLUG_STRIP_REGEX.get_or_init(|| Regex::new(r"[^a-z0-9-]").expect("Invalid slug regex"))
}

/// Lower-cases a state name and joins its words with `-`.
pub fn state_key(state: &str) -> String {
    whitespace_regex()
        .replace_all(&state.to_lowercase(), "-")
        .into_owned()
}

/// URL-friendly city slug: lower-case, hyphenated, `[a-z0-9-]` only.
pub fn city_slug(city: &str) -> String {
    let lowered = city.to_lowercase();
    let hyphenated = whitespace_regex().replace_all(&lowered, "-");
    slug_strip_regex().replace_all(&hyphenated, "").into_owned()
}

/// Groups city records by state.
///
/// Unlike the ZCTA filter this pass tolerates bad input: malformed lines are
/// logged and skipped, and records without a city or a state are ignored.
pub fn build_state_index<R: BufRead>(reader: R) -> Result<(StateIndex, IndexStats), CleanError> {
    let mut index = StateIndex::new();
    let mut stats = IndexStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|source| CleanError::Read { line_number, source })?;

        let record = match parsers::parse_record_line(&line) {
            Ok(LineOutcome::Blank) => continue,
            Ok(LineOutcome::Record(record)) => record,
            Err(e) => {
                log::warn!("Failed to parse line {}: {} ({})", line_number, e, line.trim());
                stats.malformed_lines += 1;
                continue;
            }
        };

        // 1. Both city and state must be present and non-empty
        let city = parsers::text_or_default(&record, "city", "");
        let state = parsers::text_or_default(&record, "state", "");
        if city.is_empty() || state.is_empty() {
            continue;
        }
        stats.cities_parsed += 1;

        // 2. Find or create the state bucket
        let entry = index.entry(state_key(state)).or_insert_with(|| StateEntry {
            name: state.to_string(),
            cities: Vec::new(),
        });

        // 3. First city with a given slug wins
        let slug = city_slug(city);
        if entry.cities.iter().any(|c| c.slug == slug) {
            continue;
        }

        let county = parsers::text_or_default(&record, "county", "");
        entry.cities.push(CityEntry {
            name: city.to_string(),
            slug,
            county: (!county.is_empty()).then(|| county.to_string()),
        });
    }

    stats.states = index.len();
    Ok((index, stats))
}

/// Writes the index as pretty-printed JSON with a trailing newline.
pub fn write_state_index<W: Write>(writer: &mut W, index: &StateIndex) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, index)?;
    writer.write_all(b"\n")
}

/// Builds the index from `config.input_path` and writes it to `config.output_path`.
pub fn run_index(config: &IndexConfig) -> Result<IndexStats, CleanError> {
    let input = File::open(&config.input_path).map_err(|source| CleanError::OpenInput {
        path: config.input_path.clone(),
        source,
    })?;
    let (index, stats) = build_state_index(BufReader::new(input))?;
    log::info!("Parsed {} cities", stats.cities_parsed);

    let output = File::create(&config.output_path).map_err(|source| CleanError::CreateOutput {
        path: config.output_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(output);
    write_state_index(&mut writer, &index).map_err(CleanError::write)?;
    writer.flush().map_err(CleanError::write)?;

    log::info!(
        "States: {}",
        index.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    );
    Ok(stats)
}

/// Status line printed once the index has been written.
pub fn completion_message(config: &IndexConfig, stats: &IndexStats) -> String {
    format!(
        "Written data for {} states to {}",
        stats.states,
        config.output_path.display()
    )
}
