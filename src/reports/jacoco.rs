use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::reports::{
    ParseError, ParseResult, attribute_usize, attribute_value, read_bytes, truncated,
};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a jacoco.xml coverage report into whole-percent branch and line
/// figures.
///
/// Only the report-level `<counter>` elements count; the same counter
/// types repeat inside every package, class and sourcefile node and must
/// not override the overall numbers.
pub fn parse(path: &Path) -> ParseResult<RawReport> {
    let bytes = read_bytes(path)?;
    parse_bytes(&bytes, path)
}

fn parse_bytes(bytes: &[u8], origin: &Path) -> ParseResult<RawReport> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut branch: Option<usize> = None;
    let mut line: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                if depth == 1 && tag.name().as_ref() == b"counter" {
                    record_counter(&tag, &mut branch, &mut line);
                }
                depth += 1;
            }
            Ok(Event::Empty(tag)) => {
                if depth == 1 && tag.name().as_ref() == b"counter" {
                    record_counter(&tag, &mut branch, &mut line);
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(truncated(ReportKind::Jacoco, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::Jacoco,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::Jacoco,
        origin,
        0,
        &[
            (buckets::BRANCH, branch.unwrap_or(0)),
            (buckets::LINE, line.unwrap_or(0)),
        ],
    ))
}

fn record_counter(tag: &BytesStart<'_>, branch: &mut Option<usize>, line: &mut Option<usize>) {
    let covered = attribute_usize(tag, b"covered").unwrap_or(0);
    let missed = attribute_usize(tag, b"missed").unwrap_or(0);
    match attribute_value(tag, b"type").as_deref() {
        Some("BRANCH") => *branch = Some(covered_percentage(covered, missed)),
        Some("LINE") => *line = Some(covered_percentage(covered, missed)),
        _ => {}
    }
}

/// Whole-percent coverage, truncated toward zero. A counter that saw
/// nothing counts as zero percent.
fn covered_percentage(covered: usize, missed: usize) -> usize {
    let total = covered + missed;
    if total == 0 {
        return 0;
    }
    covered * 100 / total
}
