use clap::{Args, Parser, Subcommand, ValueEnum};
use sieve_diff::FileStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "sieve")]
#[clap(about = "Trim diffs down to the lines review notes point at", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a unified diff and print its hunks as JSON
    Parse {
        diff: PathBuf,
        /// File uri stamped on the parsed hunks (defaults to the diff path)
        #[clap(short, long)]
        uri: Option<String>,
    },
    /// Print the annotated windows of a changed file
    Excerpt(ExcerptArgs),
}

#[derive(Args)]
pub struct ExcerptArgs {
    pub file: PathBuf,
    /// Unified diff of the file; without it the file is treated as added
    #[clap(short, long)]
    pub diff: Option<PathBuf>,
    #[clap(short, long, value_enum)]
    pub status: Option<StatusArg>,
    /// Path of the file before a rename
    #[clap(long)]
    pub old_path: Option<String>,
    /// Annotation store (JSON array of notes)
    #[clap(short, long)]
    pub annotations: Option<PathBuf>,
    /// Unchanged lines kept around each note
    #[clap(short, long)]
    pub radius: Option<usize>,
    #[clap(long)]
    pub merge_gap: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl From<StatusArg> for FileStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Added => FileStatus::Added,
            StatusArg::Modified => FileStatus::Modified,
            StatusArg::Deleted => FileStatus::Deleted,
            StatusArg::Renamed => FileStatus::Renamed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_excerpt_flags() {
        let cli = Cli::parse_from([
            "sieve", "excerpt", "src/lib.rs", "--diff", "lib.diff", "--status", "modified", "-r", "5",
        ]);
        let Commands::Excerpt(args) = cli.command else {
            panic!("expected excerpt");
        };
        assert_eq!(args.file, PathBuf::from("src/lib.rs"));
        assert_eq!(args.diff, Some(PathBuf::from("lib.diff")));
        assert_eq!(args.status, Some(StatusArg::Modified));
        assert_eq!(args.radius, Some(5));
        assert_eq!(args.merge_gap, None);
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::parse_from(["sieve", "parse", "a.diff", "--uri", "/ws/a.rs"]);
        assert!(matches!(cli.command, Commands::Parse { uri: Some(ref u), .. } if u == "/ws/a.rs"));
    }
}
