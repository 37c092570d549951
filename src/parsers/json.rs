// src/parsers/json.rs

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Result, Value};
use std::io::{self, Write};

/// Attempts to parse a single line as a JSON value.
pub fn parse_json_line(line: &str) -> Result<Value> {
    serde_json::from_str(line)
}

/// Single-line formatter used for every emitted record.
///
/// Separators are `", "` and `": "`. Every non-ASCII character and DEL are
/// written as `\uXXXX` escapes, so the output matches what the dataset's other
/// tooling already produces for the same records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormatter;

impl Formatter for RecordFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            // DEL is ASCII but still escaped
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Writes `record` on a single line followed by `\n`.
pub fn write_record_line<W: Write>(writer: &mut W, record: &Value) -> io::Result<()> {
    let mut serializer = Serializer::with_formatter(&mut *writer, RecordFormatter);
    record.serialize(&mut serializer)?;
    writer.write_all(b"\n")
}
