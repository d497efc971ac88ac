//! CLI argument definitions using clap
//!
//! Commands:
//! - fedcat resolve [--reverse] <path>
//! - fedcat stat <lfn>
//! - fedcat ls [-R] <lfn>
//! - fedcat rm [-r] <lfn>
//! - fedcat mkdir [-p] <lfn>
//! - fedcat rmdir [-p] <lfn>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fedcat - trivial-file-catalog resolution and federated file operations
#[derive(Parser, Debug)]
#[command(name = "fedcat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Catalog contact string,
    /// e.g. trivialcatalog_file:/etc/site/storage.xml?protocol=srm
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, default_value = "./fedcat.json")]
    pub config: PathBuf,

    /// Protocol to resolve with, overriding the catalog's preferred one
    #[arg(long, global = true)]
    pub protocol: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a logical name to a physical name
    Resolve {
        /// Map a physical name back to its logical name instead
        #[arg(long)]
        reverse: bool,

        /// Path to resolve
        path: String,
    },

    /// Print stat information for a file
    Stat {
        /// Logical file name
        lfn: String,
    },

    /// List a file or directory
    Ls {
        /// Descend into subdirectories
        #[arg(short = 'R')]
        recursive: bool,

        /// Logical file name
        lfn: String,
    },

    /// Remove a file
    Rm {
        /// Remove directories and their contents recursively
        #[arg(short = 'r')]
        recursive: bool,

        /// Logical file name
        lfn: String,
    },

    /// Create a directory
    Mkdir {
        /// Create missing parent directories
        #[arg(short = 'p')]
        parents: bool,

        /// Logical directory name
        lfn: String,
    },

    /// Remove an empty directory
    Rmdir {
        /// Also remove now-empty parent directories
        #[arg(short = 'p')]
        parents: bool,

        /// Logical directory name
        lfn: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
