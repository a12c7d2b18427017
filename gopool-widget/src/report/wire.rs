//! Legacy wire format for the widget endpoint.
//!
//! The dashboard consumer expects three JSON objects separated by newlines,
//! each written with `", "` and `": "` separators and non-ASCII characters
//! escaped as `\uXXXX`. serde_json's compact output differs on all three
//! counts, so the lines go through [`LegacyFormatter`].

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

use super::CombinedReport;

/// Render `report` as the three-line legacy body.
pub fn to_legacy_json(report: &CombinedReport) -> serde_json::Result<String> {
    let lines = [
        line(&report.status)?,
        line(&report.hashrate)?,
        line(&report.shares)?,
    ];
    Ok(lines.join("\n"))
}

fn line<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, LegacyFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

/// Compact JSON with spaced separators and ASCII-only strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.bytes().all(is_plain) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && is_plain(c as u8) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

// ASCII other than DEL is written as-is.
fn is_plain(b: u8) -> bool {
    b.is_ascii() && b != 0x7f
}
