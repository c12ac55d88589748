use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::reports::{ParseError, ParseResult, attribute_usize, read_bytes, truncated};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a spotbugsXml.xml bug collection.
///
/// Buckets follow the bug rank (1-9 high, 10-14 normal, 15+ low). Old
/// files without ranks fall back to the confidence priority.
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
                record_bug(&tag, &mut high, &mut normal, &mut low);
            }
            Ok(Event::Empty(tag)) => record_bug(&tag, &mut high, &mut normal, &mut low),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(truncated(ReportKind::SpotBugs, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::SpotBugs,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::SpotBugs,
        origin,
        high + normal + low,
        &[
            (buckets::HIGH, high),
            (buckets::NORMAL, normal),
            (buckets::LOW, low),
        ],
    ))
}

fn record_bug(tag: &BytesStart<'_>, high: &mut usize, normal: &mut usize, low: &mut usize) {
    if tag.name().as_ref() != b"BugInstance" {
        return;
    }
    match attribute_usize(tag, b"rank") {
        Some(rank) if rank <= 9 => *high += 1,
        Some(rank) if rank <= 14 => *normal += 1,
        Some(_) => *low += 1,
        None => match attribute_usize(tag, b"priority") {
            Some(1) => *high += 1,
            Some(2) => *normal += 1,
            _ => *low += 1,
        },
    }
}
