use clap::Subcommand;
use std::path::PathBuf;

pub mod extract;
pub mod info;
pub mod list;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract textures from a BA2 archive
    Extract {
        /// Source BA2 file
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        destination: PathBuf,

        /// Extract a single texture by archive path
        #[arg(long, conflicts_with = "index")]
        file: Option<String>,

        /// Extract a single texture by entry index
        #[arg(long, conflicts_with = "file")]
        index: Option<usize>,

        /// Overwrite existing files in the destination
        #[arg(short, long)]
        overwrite: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,

        /// Disable the directory-preparation thread
        #[arg(long)]
        single_threaded: bool,
    },

    /// List archive contents
    List {
        /// BA2 file
        #[arg(short, long)]
        source: PathBuf,

        /// Show detailed info (dimensions, mips, format, size)
        #[arg(short, long)]
        detailed: bool,

        /// Only list files matching glob pattern (e.g., "*_d.dds")
        #[arg(long)]
        filter: Option<String>,

        /// Only show count of matching files
        #[arg(short, long)]
        count: bool,
    },

    /// Show aggregate info about a BA2 archive
    Info {
        /// BA2 file to analyze
        source: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                source,
                destination,
                file,
                index,
                overwrite,
                quiet,
                single_threaded,
            } => extract::execute(
                source,
                destination,
                file.as_deref(),
                *index,
                *overwrite,
                !*quiet,
                *single_threaded,
            ),
            Commands::List {
                source,
                detailed,
                filter,
                count,
            } => list::execute(source, *detailed, filter.as_deref(), *count),
            Commands::Info { source } => info::execute(source),
        }
    }
}
