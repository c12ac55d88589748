use serde::Serialize;
use serde_json::Value;

use crate::types::report::{RawReport, buckets};

/// Findings of one static-analysis tool, split by severity.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisScore {
    pub name: String,
    pub id: u32,
    pub total: usize,
    pub high: usize,
    pub normal: usize,
    pub low: usize,
    #[serde(skip)]
    pub config: Value,
}

impl AnalysisScore {
    pub fn from_report(config: Value, name: &str, id: u32, report: &RawReport) -> Self {
        Self {
            name: name.to_string(),
            id,
            total: report.total,
            high: report.size_of(buckets::HIGH),
            normal: report.size_of(buckets::NORMAL),
            low: report.size_of(buckets::LOW),
            config,
        }
    }
}

/// Outcome counts of one unit-test result file.
#[derive(Debug, Clone, Serialize)]
pub struct TestScore {
    pub name: String,
    pub total: usize,
    pub failed: usize,
    pub skipped: usize,
    #[serde(skip)]
    pub config: Value,
}

impl TestScore {
    pub fn from_report(config: Value, name: &str, report: &RawReport) -> Self {
        Self {
            name: name.to_string(),
            total: report.total,
            failed: report.size_of(buckets::FAILED),
            skipped: report.size_of(buckets::SKIPPED),
            config,
        }
    }
}

/// One covered-percentage figure (whole percent, truncated).
#[derive(Debug, Clone, Serialize)]
pub struct CoverageScore {
    pub name: String,
    pub id: u32,
    pub covered_percentage: usize,
    #[serde(skip)]
    pub config: Value,
}

impl CoverageScore {
    pub fn from_percentage(config: Value, name: &str, id: u32, covered_percentage: usize) -> Self {
        Self {
            name: name.to_string(),
            id,
            covered_percentage,
            config,
        }
    }
}

/// Mutation-testing outcome. `total_mutations` counts the detected ones,
/// matching how downstream graders have always read this score.
#[derive(Debug, Clone, Serialize)]
pub struct MutationScore {
    pub name: String,
    pub total_mutations: usize,
    pub undetected_mutations: usize,
    #[serde(skip)]
    pub config: Value,
}

impl MutationScore {
    pub fn from_report(config: Value, name: &str, report: &RawReport) -> Self {
        Self {
            name: name.to_string(),
            total_mutations: report.size_of(buckets::DETECTED),
            undetected_mutations: report.size_of(buckets::UNDETECTED),
            config,
        }
    }
}

/// The terminal scoring result for one build run.
///
/// Categories fill in independently and all-or-nothing: a category with no
/// eligible input stays empty rather than half-populated, and empty
/// categories disappear from the serialized form entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedScore {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analysis: Vec<AnalysisScore>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestScore>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coverage: Vec<CoverageScore>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mutation: Vec<MutationScore>,
}

impl AggregatedScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_analysis_scores(&mut self, scores: Vec<AnalysisScore>) {
        self.analysis = scores;
    }

    pub fn add_test_scores(&mut self, scores: Vec<TestScore>) {
        self.tests = scores;
    }

    pub fn add_coverage_scores(&mut self, scores: Vec<CoverageScore>) {
        self.coverage = scores;
    }

    pub fn add_mutation_scores(&mut self, scores: Vec<MutationScore>) {
        self.mutation = scores;
    }
}
