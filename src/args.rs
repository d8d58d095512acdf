use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the bale tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose diagnostics on stderr
    pub verbose: bool,

    /// Skip build commands configured in the manifest
    pub no_build: bool,

    /// Remove previous release archives before packaging
    pub prune: bool,

    /// Project root to package (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Path to a standalone manifest file for bale configuration
    pub manifest: Option<PathBuf>,

    /// Destination folder for the archive (defaults to dist/ under the root)
    pub output: Option<PathBuf>,

    /// Archive format: zip or tar.gz
    pub format: Option<String>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        let matches = Command::new("bale")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Packages a project tree into a timestamped release archive")
            .arg(
                Arg::new("path")
                    .short('p')
                    .long("path")
                    .value_name("PATH")
                    .help("Project root to package (defaults to the current directory)")
            )
            .arg(
                Arg::new("manifest")
                    .short('m')
                    .long("manifest")
                    .value_name("FILE")
                    .help("Path to a standalone manifest file (e.g., BALE.toml) for bale configuration")
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("DIR")
                    .help("Destination folder for the archive (defaults to dist/ under the root)")
            )
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_name("FORMAT")
                    .help("Archive format: zip or tar.gz")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("Enable verbose diagnostics on stderr")
            )
            .arg(
                Arg::new("no-build")
                    .long("no-build")
                    .action(ArgAction::SetTrue)
                    .help("Skip build commands configured in the manifest")
            )
            .arg(
                Arg::new("prune")
                    .long("prune")
                    .action(ArgAction::SetTrue)
                    .help("Remove previous release archives from the destination before packaging")
            )
            .get_matches();

        Self {
            verbose: matches.get_flag("verbose"),
            no_build: matches.get_flag("no-build"),
            prune: matches.get_flag("prune"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            manifest: matches.get_one::<String>("manifest").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            format: matches.get_one::<String>("format").cloned(),
        }
    }
}
