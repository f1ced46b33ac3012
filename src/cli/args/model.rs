//! Data structures for command-line arguments.

use std::path::PathBuf;

use clap;
use memegen::CaptionRequest;
use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// Directory with the templates.
    pub templates_dir: Option<PathBuf>,
    /// Directory where image macros made from templates are written.
    pub output_dir: Option<PathBuf>,
    /// TrueType font to render captions with.
    pub font: Option<PathBuf>,

    /// What to do.
    pub command: Command,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Subcommand given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the available templates.
    Templates,
    /// Store a template downloaded from given URL.
    Download {
        url: String,
        name: String,
    },
    /// Caption a stored template.
    Meme {
        template: String,
        request: CaptionRequest,
        output_name: Option<String>,
    },
    /// Caption an image from given URL and write it to a file.
    MemeUrl {
        url: String,
        request: CaptionRequest,
        output_path: PathBuf,
    },
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General when parsing the arguments.
    #[error("invalid arguments: {}", .0.message)]
    Parse(#[from] clap::Error),
    /// Argument value that was given but is blank.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}
