use clap::Parser;

/// Command-line arguments.
///
/// Unknown flags are ignored rather than rejected: CI templates routinely
/// pass extra arguments, and a grading run must not die over them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, ignore_errors = true)]
pub struct Args {
    /// Grading configuration: literal JSON, or a path to a JSON file.
    /// Falls back to the bundled default config if omitted.
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// OAuth token used to post the result to the pull request.
    /// If omitted, the score is computed but no comment is posted.
    #[arg(short = 't', long)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// All relative paths will be interpreted relative to this directory.
    #[arg(long)]
    pub cwd: Option<String>,
}
