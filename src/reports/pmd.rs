use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::reports::{ParseError, ParseResult, attribute_usize, read_bytes, truncated};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a pmd.xml findings file.
///
/// PMD priorities run from 1 (worst) to 5: 1 and 2 are high, 3 and 4 are
/// normal, everything else is low.
pub fn parse(path: &Path) -> ParseResult<RawReport> {
    let bytes = read_bytes(path)?;
    parse_bytes(&bytes, path)
}

fn parse_bytes(bytes: &[u8], origin: &Path) -> ParseResult<RawReport> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut high = 0usize;
    let mut normal = 0usize;
    let mut low = 0usize;
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                depth += 1;
                record_violation(&tag, &mut high, &mut normal, &mut low);
            }
            Ok(Event::Empty(tag)) => record_violation(&tag, &mut high, &mut normal, &mut low),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(truncated(ReportKind::Pmd, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::Pmd,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::Pmd,
        origin,
        high + normal + low,
        &[
            (buckets::HIGH, high),
            (buckets::NORMAL, normal),
            (buckets::LOW, low),
        ],
    ))
}

fn record_violation(tag: &BytesStart<'_>, high: &mut usize, normal: &mut usize, low: &mut usize) {
    if tag.name().as_ref() != b"violation" {
        return;
    }
    match attribute_usize(tag, b"priority") {
        Some(1) | Some(2) => *high += 1,
        Some(3) | Some(4) | None => *normal += 1,
        Some(_) => *low += 1,
    }
}
