use clap::{Parser, Subcommand};

/// Discover package.json scripts and run them in reusable shell sessions
#[derive(Parser)]
#[command(name = "scriptree")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects and their manifest scripts
    List {
        /// Base directory scanned for workspace roots (defaults to the current directory)
        #[arg(long = "dir")]
        dir: Option<String>,

        /// Show the tree as JSON
        #[arg(short = 'j', long = "json")]
        json: bool,
    },
    /// Run one script of one project
    Run {
        /// Project to run in, by root name or path
        project: String,

        /// Script name as declared in the manifest
        script: String,

        /// Base directory scanned for workspace roots (defaults to the current directory)
        #[arg(long = "dir")]
        dir: Option<String>,

        /// Show the invocation without executing
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,
    },
    /// Watch manifests and run scripts interactively
    Watch {
        /// Base directory scanned for workspace roots (defaults to the current directory)
        #[arg(long = "dir")]
        dir: Option<String>,
    },
}
