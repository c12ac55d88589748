use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::reports::{ParseError, ParseResult, attribute_value, read_bytes, truncated};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a checkstyle-result.xml file.
///
/// The tool's own severities collapse onto three buckets: `error` is high,
/// `warning` is normal, anything else (`info`, `ignore`) is low.
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
                record_finding(&tag, &mut high, &mut normal, &mut low);
            }
            Ok(Event::Empty(tag)) => record_finding(&tag, &mut high, &mut normal, &mut low),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(truncated(ReportKind::Checkstyle, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::Checkstyle,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::Checkstyle,
        origin,
        high + normal + low,
        &[
            (buckets::HIGH, high),
            (buckets::NORMAL, normal),
            (buckets::LOW, low),
        ],
    ))
}

fn record_finding(tag: &BytesStart<'_>, high: &mut usize, normal: &mut usize, low: &mut usize) {
    if tag.name().as_ref() != b"error" {
        return;
    }
    match attribute_value(tag, b"severity").as_deref() {
        Some("error") => *high += 1,
        Some("warning") => *normal += 1,
        _ => *low += 1,
    }
}
