use chrono::NaiveDate;

use super::record::ViewingRecord;
use crate::error::{FeedError, Result};

pub(crate) const HEADER: [&str; 2] = ["Title", "Date"];
pub(crate) const FIRST_SEQUENCE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) line: usize,
    pub(crate) fields: Vec<String>,
}

/// Parses a viewing-activity export into records, in export order.
pub fn parse_snapshot(raw: &str) -> Result<Vec<ViewingRecord>> {
    let mut rows = read_rows(raw)?.into_iter();
    let Some(header) = rows.next() else {
        return Err(FeedError::format(1, "missing `Title,Date` header"));
    };
    if header.fields != HEADER {
        return Err(FeedError::format(
            header.line,
            format!("expected header `Title,Date`, found `{}`", header.fields.join(",")),
        ));
    }

    let mut records = Vec::new();
    let mut sequence = FIRST_SEQUENCE;
    for row in rows {
        let [title, date] = row.fields.as_slice() else {
            return Err(FeedError::format(
                row.line,
                format!("expected 2 fields, found {}", row.fields.len()),
            ));
        };
        let watched_at = parse_watch_date(date)
            .ok_or_else(|| FeedError::format(row.line, format!("invalid date `{date}`")))?;
        records.push(ViewingRecord::new(title, sequence, watched_at));
        sequence += 1;
    }
    Ok(records)
}

/// `M/D/YY` with one or two digit month and day. Years 69-99 are 19xx and
/// 00-68 are 20xx.
pub(crate) fn parse_watch_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let month = date_part(parts.next()?, 1..=2)?;
    let day = date_part(parts.next()?, 1..=2)?;
    let year = date_part(parts.next()?, 2..=2)?;
    if parts.next().is_some() {
        return None;
    }
    let century = if year < 69 { 2000 } else { 1900 };
    NaiveDate::from_ymd_opt(century + year as i32, month, day)
}

fn date_part(raw: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Splits CSV text into rows. Quoted fields may hold commas, line breaks and
/// doubled quotes. A blank line is a row with no fields; only the final line
/// terminator is optional.
pub(crate) fn read_rows(raw: &str) -> Result<Vec<Row>> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut closed_quote = false;
    let mut line = 1;
    let mut row_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    closed_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            ',' => {
                fields.push(std::mem::take(&mut field));
                closed_quote = false;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if !field.is_empty() || !fields.is_empty() || closed_quote {
                    fields.push(std::mem::take(&mut field));
                }
                rows.push(Row {
                    line: row_line,
                    fields: std::mem::take(&mut fields),
                });
                closed_quote = false;
                line += 1;
                row_line = line;
            }
            '"' if field.is_empty() && !closed_quote => in_quotes = true,
            _ if closed_quote => {
                return Err(FeedError::format(
                    line,
                    format!("unexpected `{ch}` after closing quote"),
                ));
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(FeedError::format(row_line, "unterminated quoted field"));
    }
    if !field.is_empty() || !fields.is_empty() || closed_quote {
        fields.push(field);
        rows.push(Row {
            line: row_line,
            fields,
        });
    }
    Ok(rows)
}
