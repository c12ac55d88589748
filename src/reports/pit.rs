use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::reports::{ParseError, ParseResult, attribute_value, read_bytes, truncated};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a PIT mutations.xml file.
///
/// Every `<mutation>` element lands in exactly one bucket based on its
/// `detected` attribute; a missing attribute counts as undetected.
pub fn parse(path: &Path) -> ParseResult<RawReport> {
    let bytes = read_bytes(path)?;
    parse_bytes(&bytes, path)
}

fn parse_bytes(bytes: &[u8], origin: &Path) -> ParseResult<RawReport> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut detected = 0usize;
    let mut undetected = 0usize;
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                depth += 1;
                record_mutation(&tag, &mut detected, &mut undetected);
            }
            Ok(Event::Empty(tag)) => record_mutation(&tag, &mut detected, &mut undetected),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(truncated(ReportKind::Pit, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::Pit,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::Pit,
        origin,
        detected + undetected,
        &[
            (buckets::DETECTED, detected),
            (buckets::UNDETECTED, undetected),
        ],
    ))
}

fn record_mutation(tag: &BytesStart<'_>, detected: &mut usize, undetected: &mut usize) {
    if tag.name().as_ref() != b"mutation" {
        return;
    }
    if attribute_value(tag, b"detected").as_deref() == Some("true") {
        *detected += 1;
    } else {
        *undetected += 1;
    }
}
