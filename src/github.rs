use std::env;
use std::time::Duration;

use log::{debug, info, warn};
use regex::Regex;
use serde_json::json;

use crate::types::{AggregatedScore, AppError, AppResult};

const API_BASE: &str = "https://api.github.com";

/// Delivers an aggregated score to the pull request as a Markdown comment.
///
/// Repository coordinates come from the standard Actions environment;
/// without them the delivery is skipped with a warning rather than failed,
/// so local runs stay quiet.
pub struct Commenter<'a> {
    score: &'a AggregatedScore,
    token: String,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl<'a> Commenter<'a> {
    pub fn new(score: &'a AggregatedScore, token: &str) -> Self {
        Self {
            score,
            token: token.to_string(),
            agent: make_agent(),
        }
    }

    /// Render the score and post it to the pull request under review.
    pub fn deliver(&self) -> AppResult<()> {
        let body = render_comment(self.score);
        debug!("Rendered comment:\n{body}");

        let Some((repository, pull_number)) = pull_request_coordinates() else {
            warn!("No pull request coordinates in the environment, so we'll skip the comment!");
            return Ok(());
        };

        let url = format!("{API_BASE}/repos/{repository}/issues/{pull_number}/comments");
        self.post_comment(&url, &body)?;
        info!("Posted the score to {repository}#{pull_number}");
        Ok(())
    }

    fn post_comment(&self, url: &str, body: &str) -> AppResult<()> {
        let response = self
            .agent
            .post(url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("User-Agent", "scorecard")
            .send_json(json!({ "body": body }))
            .map_err(|e| AppError::Delivery(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let detail = response.into_body().read_to_string().unwrap_or_default();
            return Err(AppError::Delivery(format!("HTTP {status}: {detail}")));
        }
        Ok(())
    }
}

/// Repository slug and pull-request number, taken from the environment
/// GitHub Actions provides on pull_request events.
fn pull_request_coordinates() -> Option<(String, u64)> {
    let repository = env::var("GITHUB_REPOSITORY").ok()?;
    let git_ref = env::var("GITHUB_REF").ok()?;
    let pull_number = pull_number_from_ref(&git_ref)?;
    Some((repository, pull_number))
}

fn pull_number_from_ref(git_ref: &str) -> Option<u64> {
    let pattern = Regex::new(r"refs/pull/(\d+)/").ok()?;
    pattern.captures(git_ref)?.get(1)?.as_str().parse().ok()
}

/// Render the aggregated score as the Markdown body of the comment.
pub fn render_comment(score: &AggregatedScore) -> String {
    let mut out = String::from("# Autograding results\n");

    if score.tests.is_empty() {
        out.push_str("\nNo unit test results were found for this build.\n");
    } else {
        out.push_str("\n## Unit tests\n\n");
        out.push_str("| Name | Total | Failed | Skipped |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for test in &score.tests {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                test.name, test.total, test.failed, test.skipped
            ));
        }

        let failed: usize = score.tests.iter().map(|test| test.failed).sum();
        if failed > 0 {
            out.push_str(&format!(
                "\n**{failed} unit test(s) failed, so mutation results were not graded.**\n"
            ));
        }
    }

    if !score.analysis.is_empty() {
        out.push_str("\n## Static analysis\n\n");
        out.push_str("| Name | Total | High | Normal | Low |\n");
        out.push_str("| --- | --- | --- | --- | --- |\n");
        for analysis in &score.analysis {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                analysis.name, analysis.total, analysis.high, analysis.normal, analysis.low
            ));
        }
    }

    if !score.coverage.is_empty() {
        out.push_str("\n## Coverage\n\n");
        out.push_str("| Name | Covered |\n");
        out.push_str("| --- | --- |\n");
        for coverage in &score.coverage {
            out.push_str(&format!(
                "| {} | {}% |\n",
                coverage.name, coverage.covered_percentage
            ));
        }
    }

    if !score.mutation.is_empty() {
        out.push_str("\n## Mutation testing\n\n");
        out.push_str("| Name | Detected | Undetected |\n");
        out.push_str("| --- | --- | --- |\n");
        for mutation in &score.mutation {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                mutation.name, mutation.total_mutations, mutation.undetected_mutations
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::types::{AnalysisScore, CoverageScore, MutationScore, TestScore};

    fn score_with_tests(total: usize, failed: usize) -> AggregatedScore {
        let mut score = AggregatedScore::new();
        score.add_test_scores(vec![TestScore {
            name: "JUnit".to_string(),
            total,
            failed,
            skipped: 0,
            config: Value::Null,
        }]);
        score
    }

    #[test]
    fn extracts_the_pull_number_from_a_merge_ref() {
        assert_eq!(pull_number_from_ref("refs/pull/42/merge"), Some(42));
        assert_eq!(pull_number_from_ref("refs/pull/7/head"), Some(7));
    }

    #[test]
    fn non_pull_refs_have_no_pull_number() {
        assert_eq!(pull_number_from_ref("refs/heads/main"), None);
        assert_eq!(pull_number_from_ref(""), None);
    }

    #[test]
    fn renders_a_test_table() {
        let comment = render_comment(&score_with_tests(10, 0));

        assert!(comment.starts_with("# Autograding results"));
        assert!(comment.contains("## Unit tests"));
        assert!(comment.contains("| JUnit | 10 | 0 | 0 |"));
    }

    #[test]
    fn notes_the_skipped_mutation_grading_when_tests_failed() {
        let comment = render_comment(&score_with_tests(10, 2));

        assert!(comment.contains("2 unit test(s) failed"));
        assert!(!comment.contains("## Mutation testing"));
    }

    #[test]
    fn a_green_run_renders_no_failure_notice() {
        let comment = render_comment(&score_with_tests(10, 0));

        assert!(!comment.contains("failed, so mutation results"));
    }

    #[test]
    fn renders_mutation_results_when_present() {
        let mut score = score_with_tests(10, 0);
        score.add_mutation_scores(vec![MutationScore {
            name: "PIT".to_string(),
            total_mutations: 30,
            undetected_mutations: 3,
            config: Value::Null,
        }]);

        let comment = render_comment(&score);

        assert!(comment.contains("## Mutation testing"));
        assert!(comment.contains("| PIT | 30 | 3 |"));
    }

    #[test]
    fn renders_analysis_and_coverage_tables_when_present() {
        let mut score = score_with_tests(10, 0);
        score.add_analysis_scores(vec![AnalysisScore {
            name: "Checkstyle".to_string(),
            id: 1,
            total: 4,
            high: 2,
            normal: 1,
            low: 1,
            config: Value::Null,
        }]);
        score.add_coverage_scores(vec![
            CoverageScore {
                name: "Branch".to_string(),
                id: 1,
                covered_percentage: 80,
                config: Value::Null,
            },
            CoverageScore {
                name: "Line".to_string(),
                id: 2,
                covered_percentage: 83,
                config: Value::Null,
            },
        ]);

        let comment = render_comment(&score);

        assert!(comment.contains("## Static analysis"));
        assert!(comment.contains("| Checkstyle | 4 | 2 | 1 | 1 |"));
        assert!(comment.contains("## Coverage"));
        assert!(comment.contains("| Branch | 80% |"));
        assert!(comment.contains("| Line | 83% |"));
    }

    #[test]
    fn an_empty_score_still_renders_a_heading() {
        let comment = render_comment(&AggregatedScore::new());

        assert!(comment.contains("# Autograding results"));
        assert!(comment.contains("No unit test results were found"));
    }
}
