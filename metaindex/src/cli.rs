// metaindex/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "metaindex")]
#[command(about = "Search documents and connection-config migration for the metadata catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Builds search documents for the test cases of a catalog snapshot
    Index {
        /// Project directory (holds metaindex.yaml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Index only this test case (fully qualified name)
        #[arg(long, short)]
        test_case: Option<String>,
    },

    /// 🔐 Normalizes a legacy connection config (authType / sslConfig)
    Migrate {
        /// JSON file holding the raw connection config
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// ⚖️  Prints the search field weights used for test case queries
    Fields {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
