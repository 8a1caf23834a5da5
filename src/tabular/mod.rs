// src/tabular/mod.rs
//! Header-led, comma-delimited text → ordered flat records.
//!
//! The input may hold several tables back to back, separated by blank
//! lines. The first non-blank line after a separator is that table's header.

pub mod record;
pub mod section;

use csv::ReaderBuilder;
use tracing::{debug, instrument, trace};

pub use record::FlatRecord;
pub use section::{scan_sections, Section};

/// Fatal failure of [`parse`]. Every variant names a 1-based source line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed quoting on line {line}: {reason}")]
    MalformedQuote { line: usize, reason: &'static str },

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("failed to decode row on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedQuote { line, .. }
            | ParseError::UnterminatedQuote { line }
            | ParseError::Decode { line, .. } => *line,
        }
    }
}

/// Parse `text` into flat records, in input order.
#[instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn parse(text: &str) -> Result<Vec<FlatRecord>, ParseError> {
    let sections = scan_sections(text)?;
    debug!(sections = sections.len(), "scanned sections");

    let mut records = Vec::new();
    for section in &sections {
        let before = records.len();
        decode_section(&text[section.start..section.end], section, &mut records)?;
        trace!(
            header_line = section.header_line,
            rows = records.len() - before,
            "decoded section"
        );
    }

    debug!(records = records.len(), "parse complete");
    Ok(records)
}

fn decode_section(
    body: &str,
    section: &Section,
    out: &mut Vec<FlatRecord>,
) -> Result<(), ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| ParseError::Decode {
            line: section.header_line,
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for result in rdr.records() {
        let row = result.map_err(|source| {
            let byte = source.position().map_or(0, |p| p.byte() as usize);
            ParseError::Decode {
                line: line_at(body, section, byte),
                source,
            }
        })?;
        let line = line_at(body, section, row.position().map_or(0, |p| p.byte() as usize));

        if row.len() > headers.len() {
            debug!(
                line,
                extra = row.len() - headers.len(),
                "ignoring values beyond the header"
            );
        }

        let mut record = FlatRecord::new(line);
        for (column, value) in headers.iter().zip(row.iter()) {
            record.insert(column.as_str(), value);
        }
        out.push(record);
    }
    Ok(())
}

/// Source line of byte offset `byte` within a section body. Counts `\n`
/// only, so CRLF and LF input number lines the same way.
fn line_at(body: &str, section: &Section, byte: usize) -> usize {
    let byte = byte.min(body.len());
    section.header_line + body.as_bytes()[..byte].iter().filter(|&&b| b == b'\n').count()
}
