//! Module for handling command line arguments.

mod model;
mod parser;


use std::env;
use std::ffi::OsString;

pub use self::model::{ArgsError, Command, Options};
use self::parser::create_parser;


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.get_matches_from_safe(argv)?;
    Options::try_from(matches)
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use memegen::CaptionRequest;
    use spectral::prelude::*;

    use super::{parse_from_argv, ArgsError, Command};
    use crate::NAME;

    #[test]
    fn no_args() {
        assert_that!(parse_from_argv(Vec::<&str>::new())).is_err();
        assert_that!(parse_from_argv(vec![*NAME])).is_err();
    }

    #[test]
    fn unknown_command() {
        assert_that!(parse_from_argv(vec![*NAME, "frobnicate"])).is_err();
    }

    #[test]
    fn templates() {
        let opts = parse_from_argv(vec![*NAME, "templates"]).unwrap();
        assert_eq!(Command::Templates, opts.command);
        assert_eq!(0, opts.verbosity);
    }

    #[test]
    fn download() {
        let opts = parse_from_argv(vec![*NAME, "download", "https://x/drake.png", "drake.png"])
            .unwrap();
        assert_eq!(Command::Download{
            url: "https://x/drake.png".into(),
            name: "drake.png".into(),
        }, opts.command);
    }

    #[test]
    fn download_needs_name() {
        assert_that!(parse_from_argv(vec![*NAME, "download", "https://x/drake.png"])).is_err();
        match parse_from_argv(vec![*NAME, "download", "https://x/drake.png", "  "]) {
            Err(ArgsError::Empty(arg)) => assert_eq!("name", arg),
            other => panic!("expected an empty argument error, got {:?}", other),
        }
    }

    #[test]
    fn meme_with_text() {
        let opts = parse_from_argv(vec![
            *NAME, "meme", "drake.png", "studying | watching memes"]).unwrap();
        assert_eq!(Command::Meme{
            template: "drake.png".into(),
            request: CaptionRequest::new("studying", "watching memes"),
            output_name: None,
        }, opts.command);
    }

    #[test]
    fn meme_flags_override_text() {
        let opts = parse_from_argv(vec![
            *NAME, "meme", "drake.png", "a | b", "--bottom", "c", "-o", "out.jpg"]).unwrap();
        assert_eq!(Command::Meme{
            template: "drake.png".into(),
            request: CaptionRequest::new("a", "c"),
            output_name: Some("out.jpg".into()),
        }, opts.command);
    }

    #[test]
    fn meme_without_text() {
        let opts = parse_from_argv(vec![*NAME, "meme", "drake.png", "-t", "top only"]).unwrap();
        match opts.command {
            Command::Meme{request, ..} => assert_eq!(CaptionRequest::top("top only"), request),
            cmd => panic!("expected the meme command, got {:?}", cmd),
        }
    }

    #[test]
    fn memeurl_needs_output() {
        assert_that!(parse_from_argv(vec![*NAME, "memeurl", "https://x/img.jpg", "|bottom"]))
            .is_err();

        let opts = parse_from_argv(vec![
            *NAME, "memeurl", "https://x/img.jpg", "|bottom", "--output", "img.jpg"]).unwrap();
        assert_eq!(Command::MemeUrl{
            url: "https://x/img.jpg".into(),
            request: CaptionRequest::bottom("bottom"),
            output_path: PathBuf::from("img.jpg"),
        }, opts.command);
    }

    #[test]
    fn verbosity() {
        let opts = parse_from_argv(vec![*NAME, "-vv", "templates"]).unwrap();
        assert_eq!(2, opts.verbosity);
        assert!(opts.verbose());

        let opts = parse_from_argv(vec![*NAME, "-q", "templates"]).unwrap();
        assert_eq!(-1, opts.verbosity);
        assert!(opts.quiet());

        assert_that!(parse_from_argv(vec![*NAME, "-v", "-q", "templates"])).is_err();
    }

    #[test]
    fn directories() {
        let opts = parse_from_argv(vec![
            *NAME, "--templates-dir", "/tmp/t", "templates", "--output-dir", "/tmp/o"]).unwrap();
        assert_eq!(Some(PathBuf::from("/tmp/t")), opts.templates_dir);
        assert_eq!(Some(PathBuf::from("/tmp/o")), opts.output_dir);
    }
}
