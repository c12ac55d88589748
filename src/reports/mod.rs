use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::BytesStart;
use thiserror::Error;

use crate::types::{RawReport, ReportKind};

pub mod checkstyle;
pub mod jacoco;
pub mod junit;
pub mod pit;
pub mod pmd;
pub mod spotbugs;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {kind} XML in {}: {source}", path.display())]
    Xml {
        kind: ReportKind,
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed {kind} XML in {}: the document is truncated", path.display())]
    Truncated { kind: ReportKind, path: PathBuf },
}

/// Normalize one report file with the parser for its kind.
pub fn parse_report(kind: ReportKind, path: &Path) -> ParseResult<RawReport> {
    match kind {
        ReportKind::Junit => junit::parse(path),
        ReportKind::Pit => pit::parse(path),
        ReportKind::Checkstyle => checkstyle::parse(path),
        ReportKind::Pmd => pmd::parse(path),
        ReportKind::SpotBugs => spotbugs::parse(path),
        ReportKind::Jacoco => jacoco::parse(path),
    }
}

pub(crate) fn read_bytes(path: &Path) -> ParseResult<Vec<u8>> {
    fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn truncated(kind: ReportKind, path: &Path) -> ParseError {
    ParseError::Truncated {
        kind,
        path: path.to_path_buf(),
    }
}

pub(crate) fn attribute_value(tag: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    tag.attributes()
        .with_checks(false)
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| String::from_utf8(attr.value.into_owned()).ok())
}

pub(crate) fn attribute_usize(tag: &BytesStart<'_>, name: &[u8]) -> Option<usize> {
    attribute_value(tag, name).and_then(|value| value.trim().parse().ok())
}
