use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the packer
#[derive(Debug)]
pub struct Args {
    /// Report every entry as it is added
    pub verbose: bool,

    /// List planned entries without writing the archive
    pub dry_run: bool,

    /// Source root (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Layout manifest overriding the built-in file and directory lists
    pub manifest: Option<PathBuf>,

    /// Target archive path overriding the layout's output
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(command().get_matches())
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            dry_run: matches.get_flag("dry-run"),
            root: matches.get_one::<String>("root").map(PathBuf::from),
            manifest: matches.get_one::<String>("manifest").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
        }
    }
}

fn command() -> Command {
    Command::new("lurti-pack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Package the lurti sources into a release zip")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Directory the packaged paths are resolved against"),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("FILE")
                .help("TOML manifest overriding name, prefix, output, files and dirs"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the archive here instead of the layout's output"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("List the entries that would be packed and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
}
