use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::reports::{ParseError, ParseResult, read_bytes, truncated};
use crate::types::{RawReport, ReportKind, buckets};

/// Parse a surefire-style JUnit result file.
///
/// Counts `<testcase>` elements and their failure/error/skipped children.
/// The suite-level summary attributes are ignored in favor of the actual
/// elements, so hand-edited summaries cannot skew the counts. A document
/// that ends with unclosed elements is rejected as truncated.
pub fn parse(path: &Path) -> ParseResult<RawReport> {
    let bytes = read_bytes(path)?;
    parse_bytes(&bytes, path)
}

fn parse_bytes(bytes: &[u8], origin: &Path) -> ParseResult<RawReport> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut total = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;
    let mut in_case = false;
    let mut case_flagged = false;
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                depth += 1;
                match tag.name().as_ref() {
                    b"testcase" => {
                        total += 1;
                        in_case = true;
                        case_flagged = false;
                    }
                    b"failure" | b"error" if in_case && !case_flagged => {
                        failed += 1;
                        case_flagged = true;
                    }
                    b"skipped" if in_case && !case_flagged => {
                        skipped += 1;
                        case_flagged = true;
                    }
                    _ => {}
                }
            }
            // Self-closing testcases have no children to inspect
            Ok(Event::Empty(tag)) => match tag.name().as_ref() {
                b"testcase" => {
                    total += 1;
                    in_case = false;
                }
                b"failure" | b"error" if in_case && !case_flagged => {
                    failed += 1;
                    case_flagged = true;
                }
                b"skipped" if in_case && !case_flagged => {
                    skipped += 1;
                    case_flagged = true;
                }
                _ => {}
            },
            Ok(Event::End(tag)) => {
                depth = depth.saturating_sub(1);
                if tag.name().as_ref() == b"testcase" {
                    in_case = false;
                }
            }
            Ok(Event::Eof) => {
                // The reader reports a bare end of input even when elements
                // are still open, so unclosed depth marks a cut-off document.
                if depth != 0 {
                    return Err(truncated(ReportKind::Junit, origin));
                }
                break;
            }
            Err(source) => {
                return Err(ParseError::Xml {
                    kind: ReportKind::Junit,
                    path: origin.to_path_buf(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(RawReport::new(
        ReportKind::Junit,
        origin,
        total,
        &[(buckets::FAILED, failed), (buckets::SKIPPED, skipped)],
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_str(xml: &str) -> RawReport {
        parse_bytes(xml.as_bytes(), Path::new("TEST-demo.xml")).expect("report should parse")
    }

    #[test]
    fn counts_passing_failing_and_skipped_cases() {
        let report = parse_str(
            r#"<testsuite name="DemoTest" tests="4" failures="1" skipped="1">
                <testcase classname="DemoTest" name="adds"/>
                <testcase classname="DemoTest" name="subtracts">
                    <failure message="expected 1 but was 2">stack trace</failure>
                </testcase>
                <testcase classname="DemoTest" name="divides">
                    <skipped/>
                </testcase>
                <testcase classname="DemoTest" name="multiplies"/>
            </testsuite>"#,
        );

        assert_eq!(report.total, 4);
        assert_eq!(report.size_of(buckets::FAILED), 1);
        assert_eq!(report.size_of(buckets::SKIPPED), 1);
    }

    #[test]
    fn errors_count_as_failures() {
        let report = parse_str(
            r#"<testsuite name="DemoTest" tests="2">
                <testcase classname="DemoTest" name="boom">
                    <error type="java.lang.IllegalStateException">stack</error>
                </testcase>
                <testcase classname="DemoTest" name="fine"/>
            </testsuite>"#,
        );

        assert_eq!(report.total, 2);
        assert_eq!(report.size_of(buckets::FAILED), 1);
    }

    #[test]
    fn summary_attributes_do_not_override_element_counts() {
        // Summary claims ten tests, the body holds one
        let report = parse_str(
            r#"<testsuite name="DemoTest" tests="10" failures="9">
                <testcase classname="DemoTest" name="only"/>
            </testsuite>"#,
        );

        assert_eq!(report.total, 1);
        assert_eq!(report.size_of(buckets::FAILED), 0);
    }

    #[test]
    fn handles_a_testsuites_wrapper() {
        let report = parse_str(
            r#"<testsuites>
                <testsuite name="A"><testcase classname="A" name="one"/></testsuite>
                <testsuite name="B"><testcase classname="B" name="two">
                    <failure message="nope"/>
                </testcase></testsuite>
            </testsuites>"#,
        );

        assert_eq!(report.total, 2);
        assert_eq!(report.size_of(buckets::FAILED), 1);
    }

    #[test]
    fn a_case_with_several_failure_children_counts_once() {
        let report = parse_str(
            r#"<testsuite name="DemoTest">
                <testcase classname="DemoTest" name="odd">
                    <failure message="first"/>
                    <failure message="second"/>
                </testcase>
            </testsuite>"#,
        );

        assert_eq!(report.total, 1);
        assert_eq!(report.size_of(buckets::FAILED), 1);
    }

    #[test]
    fn empty_suite_normalizes_to_zero_counts() {
        let report = parse_str(r#"<testsuite name="DemoTest" tests="0"/>"#);

        assert_eq!(report.total, 0);
        assert_eq!(report.size_of(buckets::FAILED), 0);
        assert_eq!(report.size_of(buckets::SKIPPED), 0);
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let result = parse_bytes(
            b"<testsuite><testcase></testsuite>",
            Path::new("TEST-broken.xml"),
        );

        assert!(result.is_err());
    }

    #[test]
    fn a_report_cut_off_mid_write_is_a_parse_error() {
        // The summary claims a failure but the file ends before the
        // failing case closes; accepting it would report a green suite
        let result = parse_bytes(
            br#"<testsuite name="DemoTest" tests="2" failures="1">
                <testcase classname="DemoTest" name="adds"/>
                <testcase classname="DemoTest" name="subtracts">"#,
            Path::new("TEST-cut.xml"),
        );

        assert!(matches!(result, Err(ParseError::Truncated { .. })));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let result = parse(Path::new("does/not/exist/TEST-missing.xml"));

        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
