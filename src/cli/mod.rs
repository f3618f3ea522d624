//! Command-line interface for the nikki binary.

use clap::Parser;

/// Close today's diary issues, relay them to Typetalk, and open the next
/// entry.
///
/// Connection settings come from environment variables (`REPOSITORY`,
/// `TYPETALK_TOPIC_ID`, `TYPETALK_TOKEN`, …); flags here only override
/// behavior for one invocation.
#[derive(Debug, Parser)]
#[command(name = "nikki", version, about)]
pub struct Cli {
    /// Fetch and notify only; skip the close and create calls.
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["nikki"]).unwrap();
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_dry_run_flag() {
        let cli = Cli::try_parse_from(["nikki", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["nikki", "--force"]).is_err());
    }
}
