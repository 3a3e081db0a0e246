//! Command-line argument parsing.

use std::{error::Error, fmt::Display, path::PathBuf, process};

use crate::dir::BillyBotDirectory;

/// Parsed command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    ConfigPath(PathBuf),
    DatadirPath(BillyBotDirectory),
}

/// Parse command-line arguments.
///
/// `args` includes the program name at `args[0]`, `version` is printed on `--version`.
pub fn parse_args(args: Vec<String>, version: impl Display) -> Result<Vec<Arg>, Box<dyn Error>> {
    let mut res = Vec::new();

    let app_name = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("billybot-gui");

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        eprintln!("{}", version);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!(
            r#"
Usage: {app_name} [OPTIONS]

Options:
    --conf <PATH>       Path of the configuration file
    --datadir <PATH>    Path of the BillyBot data directory
    -v, --version       Display {app_name} version
    -h, --help          Print help
        "#
        );
        process::exit(0);
    }

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--conf" => {
                let path = iter.next().ok_or("missing arg to --conf")?;
                res.push(Arg::ConfigPath(PathBuf::from(path)));
            }
            "--datadir" => {
                let path = iter.next().ok_or("missing arg to --datadir")?;
                res.push(Arg::DatadirPath(BillyBotDirectory::new(PathBuf::from(path))));
            }
            a => return Err(format!("unknown argument {}", a).into()),
        }
    }

    Ok(res)
}
