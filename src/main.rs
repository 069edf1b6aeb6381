#[macro_use]
extern crate log;

mod desktop_picture;
mod dock;
mod error;
mod paths;

use std::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

use crate::dock::{Killall, ProcessTerminator};
use crate::error::{AppErr, ErrorKind};
use crate::paths::UserDirs;

const USAGE: &str = "usage: wally path/to/image.jpg";

struct Options {
    image: String,
    verbose: bool,
    log_file: Option<PathBuf>,
}

fn cli() -> Command {
    Command::new("wally")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sets the desktop wallpaper on every space and display")
        .arg(
            Arg::new("image")
                .value_name("IMAGE")
                .help("Path to the image, absolute, relative or starting with ~")
                .required(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log what is being done")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Write the log to FILE instead of stderr")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn parse_args<I, T>(args: I) -> Result<Options, AppErr>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match cli().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => err.exit(),
            _ => return Err(AppErr::usage(USAGE)),
        },
    };

    let image = matches
        .get_one::<String>("image")
        .cloned()
        .ok_or_else(|| AppErr::usage(USAGE))?;

    Ok(Options {
        image,
        verbose: matches.get_flag("verbose"),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    })
}

fn init_logging(options: &Options) -> std::io::Result<()> {
    let level = if options.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    match options.log_file {
        Some(ref path) => simple_logging::log_to_file(path, level),
        None => {
            simple_logging::log_to_stderr(level);
            Ok(())
        }
    }
}

/// Resolves the image, rewrites the Dock's database and restarts the Dock.
/// The Dock is only touched once the database update has committed.
fn run(image_arg: &str, dirs: &UserDirs, terminator: &dyn ProcessTerminator) -> Result<(), AppErr> {
    let image_path = paths::resolve_image_path(image_arg, dirs)?;
    desktop_picture::set_wallpaper_at(&dirs.desktop_picture_db(), &image_path)?;
    dock::restart(terminator);
    Ok(())
}

fn main() {
    let options = match parse_args(std::env::args_os()) {
        Ok(options) => options,
        Err(err) => {
            println!("{}", err.message());
            process::exit(1);
        }
    };

    if let Err(err) = init_logging(&options) {
        eprintln!("Could not open log file: {}", err);
        simple_logging::log_to_stderr(LevelFilter::Warn);
    }

    let result = UserDirs::from_env().and_then(|dirs| run(&options.image, &dirs, &Killall));
    if let Err(err) = result {
        if err.kind() == ErrorKind::PreferenceStore {
            if let Some(cause) = err.source() {
                error!("desktoppicture.db: {}", cause);
            }
        }
        eprintln!("{}", err);
        process::exit(1);
    }
}
