use clap::Parser;

/// Command-line arguments for gitslice
#[derive(Parser, Debug, Clone)]
#[command(name = "gitslice")]
#[command(about = "Download a branch or subdirectory of a Git repository without full history")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// GitHub/GitLab URL: repository root, tree URL with branch and
    /// optional subdirectory, or SSH form
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output directory (must not already exist)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,

    /// Branch to fetch, overriding the one parsed from the URL
    #[arg(short, long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Keep the .git directory when fetching a whole tree
    #[arg(long)]
    pub keep_git: bool,

    /// Preview the git invocations without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}
