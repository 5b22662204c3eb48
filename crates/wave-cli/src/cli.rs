use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lwv", version, about = "Lancewave marketplace utilities")]
pub struct Cli {
    /// Only log errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bulk-import tasks from a JSON file as featured listings
    ImportFeatured(ImportFeaturedArgs),
}

#[derive(Debug, Args)]
pub struct ImportFeaturedArgs {
    /// Path to a JSON array of task drafts
    #[arg(long)]
    pub file: PathBuf,

    /// Database path (overrides the configured store path)
    #[arg(long)]
    pub db: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn import_featured_parses() {
        let cli = Cli::parse_from(["lwv", "import-featured", "--file", "tasks.json"]);
        let Commands::ImportFeatured(args) = cli.command;
        assert_eq!(args.file, PathBuf::from("tasks.json"));
        assert!(args.db.is_none());
    }
}
