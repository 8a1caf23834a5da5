// src/tabular/section.rs
use tracing::trace;

use super::ParseError;

/// A header-led block of rows: `[start, end)` byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// 1-based line of the header row.
    pub header_line: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    /// At the start of a field (or of a record).
    FieldStart,
    Unquoted,
    /// Inside a quoted field; carries the line the field opened on.
    Quoted(usize),
    /// Saw a `"` inside a quoted field: either an escape or the closing quote.
    QuoteSeen(usize),
    /// Closed quoted field followed by `\r`; only a delimiter or newline may follow.
    Closed,
}

/// Split `text` into sections separated by blank lines, validating quoting
/// as we go.
///
/// Blank lines only separate sections at record boundaries; inside a quoted
/// field they are content.
pub fn scan_sections(text: &str) -> Result<Vec<Section>, ParseError> {
    let mut sections = Vec::new();
    let mut open: Option<(usize, usize)> = None;
    let mut state = Quote::FieldStart;
    let mut pos = 0;
    let mut line_no = 0;

    for raw in text.split_inclusive('\n') {
        line_no += 1;
        // A leading BOM is not part of the first field.
        let chunk = if line_no == 1 {
            raw.strip_prefix('\u{feff}').unwrap_or(raw)
        } else {
            raw
        };
        let skipped = raw.len() - chunk.len();
        pos += skipped;
        let at_boundary = state == Quote::FieldStart;

        if at_boundary && chunk.trim().is_empty() {
            if let Some((header_line, start)) = open.take() {
                trace!(header_line, start, end = pos, "closing section");
                sections.push(Section {
                    header_line,
                    start,
                    end: pos,
                });
            }
            pos += chunk.len();
            continue;
        }

        if at_boundary && open.is_none() {
            trace!(line = line_no, "new section header");
            open = Some((line_no, pos));
        }

        for c in chunk.chars() {
            state = step(state, c, line_no)?;
        }
        pos += chunk.len();
    }

    if let Quote::Quoted(line) = state {
        return Err(ParseError::UnterminatedQuote { line });
    }

    if let Some((header_line, start)) = open {
        sections.push(Section {
            header_line,
            start,
            end: text.len(),
        });
    }
    Ok(sections)
}

fn step(state: Quote, c: char, line: usize) -> Result<Quote, ParseError> {
    let next = match (state, c) {
        (Quote::FieldStart, '"') => Quote::Quoted(line),
        (Quote::FieldStart, ',' | '\n' | '\r') => Quote::FieldStart,
        (Quote::FieldStart, _) => Quote::Unquoted,

        (Quote::Unquoted, '"') => {
            return Err(ParseError::MalformedQuote {
                line,
                reason: "quote inside an unquoted field",
            })
        }
        (Quote::Unquoted, ',' | '\n') => Quote::FieldStart,
        (Quote::Unquoted, _) => Quote::Unquoted,

        (Quote::Quoted(opened), '"') => Quote::QuoteSeen(opened),
        (Quote::Quoted(opened), _) => Quote::Quoted(opened),

        (Quote::QuoteSeen(opened), '"') => Quote::Quoted(opened),
        (Quote::QuoteSeen(_) | Quote::Closed, ',' | '\n') => Quote::FieldStart,
        (Quote::QuoteSeen(_) | Quote::Closed, '\r') => Quote::Closed,
        (Quote::QuoteSeen(_) | Quote::Closed, _) => {
            return Err(ParseError::MalformedQuote {
                line,
                reason: "unexpected character after closing quote",
            })
        }
    };
    Ok(next)
}
