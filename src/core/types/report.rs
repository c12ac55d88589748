use std::collections::HashMap;
use std::path::{Path, PathBuf};

use strum::Display;

/// Bucket names shared between the report parsers and the score builders.
pub mod buckets {
    pub const FAILED: &str = "failed";
    pub const SKIPPED: &str = "skipped";

    pub const HIGH: &str = "high";
    pub const NORMAL: &str = "normal";
    pub const LOW: &str = "low";

    pub const DETECTED: &str = "detected";
    pub const UNDETECTED: &str = "undetected";

    pub const BRANCH: &str = "branch";
    pub const LINE: &str = "line";
}

/// Scoring categories a report can contribute to. Each category owns one
/// section of the grading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Analysis,
    Test,
    Coverage,
    Mutation,
}

/// The tools whose report files the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReportKind {
    #[strum(serialize = "JUnit")]
    Junit,
    #[strum(serialize = "PIT")]
    Pit,
    Checkstyle,
    #[strum(serialize = "PMD")]
    Pmd,
    SpotBugs,
    #[strum(serialize = "JaCoCo")]
    Jacoco,
}

impl ReportKind {
    pub fn category(&self) -> Category {
        match self {
            ReportKind::Junit => Category::Test,
            ReportKind::Pit => Category::Mutation,
            ReportKind::Checkstyle | ReportKind::Pmd | ReportKind::SpotBugs => Category::Analysis,
            ReportKind::Jacoco => Category::Coverage,
        }
    }
}

/// Normalized form of one parsed report file: an overall item count plus
/// named bucket counts, uniform across tools.
#[derive(Debug, Clone)]
pub struct RawReport {
    pub kind: ReportKind,
    pub origin: PathBuf,
    pub total: usize,
    buckets: HashMap<String, usize>,
}

impl RawReport {
    pub fn new(kind: ReportKind, origin: &Path, total: usize, buckets: &[(&str, usize)]) -> Self {
        Self {
            kind,
            origin: origin.to_path_buf(),
            total,
            buckets: buckets
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        }
    }

    /// Count recorded under a named bucket; absent buckets count as zero.
    pub fn size_of(&self, bucket: &str) -> usize {
        self.buckets.get(bucket).copied().unwrap_or(0)
    }
}
