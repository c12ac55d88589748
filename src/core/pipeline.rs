use std::path::Path;

use log::{debug, error, info, warn};

use crate::core::gate::{MutationEligibility, mutation_eligibility};
use crate::core::locator::locate_reports;
use crate::reports;
use crate::types::config::GradingConfig;
use crate::types::{
    AggregatedScore, AnalysisScore, AppResult, Category, CoverageScore, MutationScore, RawReport,
    ReportKind, TestScore, buckets,
};

/// Where each tool leaves its report, relative to the working directory.
pub const JUNIT_REPORT_DIR: &str = "target/surefire-reports";
pub const PIT_REPORT_DIR: &str = "target/pit-reports";
pub const CHECKSTYLE_REPORT: &str = "target/checkstyle-result.xml";
pub const PMD_REPORT: &str = "target/pmd.xml";
pub const SPOTBUGS_REPORT: &str = "target/spotbugsXml.xml";
pub const JACOCO_REPORT: &str = "target/site/jacoco/jacoco.xml";

/// Run the grading pipeline over one build's artifacts under `root`.
///
/// Unit-test reports are parsed first because they drive the mutation
/// gate. Analysis and coverage reports are best-effort; their parse
/// failures degrade to an absent category instead of failing the run.
pub fn run_pipeline(root: &Path, config: &GradingConfig) -> AppResult<AggregatedScore> {
    let junit_reports = parse_primary(ReportKind::Junit, &root.join(JUNIT_REPORT_DIR))?;

    let pit_reports = match mutation_eligibility(&junit_reports) {
        MutationEligibility::Eligible => {
            parse_primary(ReportKind::Pit, &root.join(PIT_REPORT_DIR))?
        }
        MutationEligibility::TestsFailed { failed, reports } => {
            warn!("Not all unit tests passed ({failed} failing), so mutation results are skipped");
            for report in reports.iter().filter(|r| r.size_of(buckets::FAILED) > 0) {
                debug!(
                    "{} recorded {} failure(s)",
                    report.origin.display(),
                    report.size_of(buckets::FAILED)
                );
            }
            Vec::new()
        }
    };

    let checkstyle = parse_optional(ReportKind::Checkstyle, &root.join(CHECKSTYLE_REPORT));
    let pmd = parse_optional(ReportKind::Pmd, &root.join(PMD_REPORT));
    let spotbugs = parse_optional(ReportKind::SpotBugs, &root.join(SPOTBUGS_REPORT));
    let jacoco = parse_optional(ReportKind::Jacoco, &root.join(JACOCO_REPORT));

    let mut score = AggregatedScore::new();

    if let Some(checkstyle) = &checkstyle {
        let section = config.section_for(checkstyle.kind.category());
        let mut scores = vec![AnalysisScore::from_report(
            section.clone(),
            "Checkstyle",
            1,
            checkstyle,
        )];
        if let Some(pmd) = &pmd {
            scores.push(AnalysisScore::from_report(section.clone(), "PMD", 2, pmd));
        }
        if let Some(spotbugs) = &spotbugs {
            scores.push(AnalysisScore::from_report(section, "FindBugs", 3, spotbugs));
        }
        score.add_analysis_scores(scores);
    }

    if !junit_reports.is_empty() {
        let section = config.section_for(Category::Test);
        score.add_test_scores(
            junit_reports
                .iter()
                .map(|report| TestScore::from_report(section.clone(), "JUnit", report))
                .collect(),
        );
    }

    if let Some(jacoco) = &jacoco {
        let section = config.section_for(jacoco.kind.category());
        score.add_coverage_scores(vec![
            CoverageScore::from_percentage(
                section.clone(),
                "Branch",
                1,
                jacoco.size_of(buckets::BRANCH),
            ),
            CoverageScore::from_percentage(section, "Line", 2, jacoco.size_of(buckets::LINE)),
        ]);
    }

    if let Some(pit) = pit_reports.first() {
        let section = config.section_for(pit.kind.category());
        score.add_mutation_scores(vec![MutationScore::from_report(section, "PIT", pit)]);
    }

    info!(
        "Aggregated {} analysis, {} test, {} coverage and {} mutation score(s)",
        score.analysis.len(),
        score.tests.len(),
        score.coverage.len(),
        score.mutation.len()
    );
    if let Ok(json) = serde_json::to_string_pretty(&score) {
        debug!("Aggregated score: {json}");
    }

    Ok(score)
}

/// Locate and parse every report in a primary category. A broken report
/// here would corrupt the gate decision, so parse failures propagate and
/// abort the run.
fn parse_primary(kind: ReportKind, dir: &Path) -> AppResult<Vec<RawReport>> {
    let paths = locate_reports(dir);
    if paths.is_empty() {
        warn!("No {kind} files found!");
        return Ok(Vec::new());
    }

    let mut reports = Vec::with_capacity(paths.len());
    for path in &paths {
        reports.push(reports::parse_report(kind, path)?);
    }
    info!("Parsed {} {kind} report file(s)", reports.len());
    Ok(reports)
}

/// Parse a single-file optional report. Absence and parse failures both
/// degrade to `None`.
fn parse_optional(kind: ReportKind, path: &Path) -> Option<RawReport> {
    if !path.exists() {
        warn!("No {kind} report found at {}", path.display());
        return None;
    }

    match reports::parse_report(kind, path) {
        Ok(report) => {
            debug!("Parsed {kind} report: {} item(s)", report.total);
            Some(report)
        }
        Err(err) => {
            error!("Skipping {kind} report: {err}");
            None
        }
    }
}
