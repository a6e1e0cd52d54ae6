use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trustlens",
    version,
    about = "Static-analysis finding aggregation, enrichment and trust scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate scanner reports into an enriched trust report
    Run(RunArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the Bandit JSON report
    #[arg(long)]
    pub bandit: Option<String>,

    /// Path to the Semgrep JSON report
    #[arg(long)]
    pub semgrep: Option<String>,

    /// Root of the scanned source tree
    #[arg(long, default_value = ".")]
    pub source_root: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "output")]
    pub output: String,

    /// LLM provider for enrichment
    #[arg(long, default_value = "gemini")]
    pub provider: String,

    /// LLM model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API key (or $VAR environment reference)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Cache directory for CWE/enrichment lookups
    #[arg(long)]
    pub cache_dir: Option<String>,

    /// Dispatch enrichment batches concurrently
    #[arg(long)]
    pub concurrent: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// YAML configuration file to check
    pub config: String,
}
