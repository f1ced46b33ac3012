//! Module defining the command line argument parser.

use std::path::PathBuf;

use clap::{self, AppSettings, Arg, ArgMatches, SubCommand};
use memegen::CaptionRequest;

use super::super::{NAME, VERSION};
use super::model::{ArgsError, Command, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Error> {
        // Global flags may be given either before or after the subcommand.
        let sub = matches.subcommand().1;
        let global_count = |name: &str| {
            let count = matches.occurrences_of(name);
            sub.map_or(count, |m| count.max(m.occurrences_of(name))) as isize
        };
        let global_path = |name: &str| {
            sub.and_then(|m| m.value_of(name)).or_else(|| matches.value_of(name))
                .map(PathBuf::from)
        };

        let verbosity = global_count(OPT_VERBOSE) - global_count(OPT_QUIET);
        let templates_dir = global_path(OPT_TEMPLATES_DIR);
        let output_dir = global_path(OPT_OUTPUT_DIR);
        let font = global_path(OPT_FONT);

        let command = match matches.subcommand() {
            (CMD_TEMPLATES, _) => Command::Templates,
            (CMD_DOWNLOAD, Some(m)) => Command::Download{
                url: required(m, ARG_URL)?,
                name: required(m, ARG_NAME)?,
            },
            (CMD_MEME, Some(m)) => Command::Meme{
                template: required(m, ARG_TEMPLATE)?,
                request: caption_request(m),
                output_name: m.value_of(OPT_OUTPUT).map(str::trim)
                    .filter(|n| !n.is_empty()).map(str::to_owned),
            },
            (CMD_MEMEURL, Some(m)) => Command::MemeUrl{
                url: required(m, ARG_URL)?,
                request: caption_request(m),
                output_path: PathBuf::from(required(m, OPT_OUTPUT)?),
            },
            // clap makes sure a valid subcommand is always given.
            (cmd, _) => return Err(clap::Error::with_description(
                &format!("unknown command `{}`", cmd), clap::ErrorKind::UnrecognizedSubcommand).into()),
        };

        Ok(Options{verbosity, templates_dir, output_dir, font, command})
    }
}

/// Get the trimmed value of a required argument.
fn required(matches: &ArgMatches, arg: &'static str) -> Result<String, ArgsError> {
    let value = matches.value_of(arg).unwrap_or("").trim();
    if value.is_empty() {
        return Err(ArgsError::Empty(arg));
    }
    Ok(value.to_owned())
}

/// Get the caption texts, with explicit --top/--bottom overriding the `top | bottom` argument.
fn caption_request(matches: &ArgMatches) -> CaptionRequest {
    let mut request = matches.value_of(ARG_TEXT)
        .map(CaptionRequest::parse)
        .unwrap_or_default();
    if let Some(top) = matches.value_of(OPT_TOP) {
        request.top_text = top.trim().to_owned();
    }
    if let Some(bottom) = matches.value_of(OPT_BOTTOM) {
        request.bottom_text = bottom.trim().to_owned();
    }
    request
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const CMD_TEMPLATES: &str = "templates";
const CMD_DOWNLOAD: &str = "download";
const CMD_MEME: &str = "meme";
const CMD_MEMEURL: &str = "memeurl";

const ARG_URL: &str = "url";
const ARG_NAME: &str = "name";
const ARG_TEMPLATE: &str = "template";
const ARG_TEXT: &str = "text";
const OPT_TOP: &str = "top";
const OPT_BOTTOM: &str = "bottom";
const OPT_OUTPUT: &str = "output";
const OPT_TEMPLATES_DIR: &str = "templates-dir";
const OPT_OUTPUT_DIR: &str = "output-dir";
const OPT_FONT: &str = "font";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)

        .setting(AppSettings::StrictUtf8)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        .subcommand(SubCommand::with_name(CMD_TEMPLATES)
            .about("List the available templates"))
        .subcommand(SubCommand::with_name(CMD_DOWNLOAD)
            .about("Download a template and store it under given name")
            .arg(Arg::with_name(ARG_URL)
                .value_name("URL")
                .required(true)
                .help("Address of the template image"))
            .arg(Arg::with_name(ARG_NAME)
                .value_name("NAME")
                .required(true)
                .help("File name to store the template as, including the extension")))
        .subcommand(caption_args(SubCommand::with_name(CMD_MEME)
            .about("Caption a stored template")
            .arg(Arg::with_name(ARG_TEMPLATE)
                .value_name("TEMPLATE")
                .required(true)
                .help("Name of the template, as listed by the `templates` command")))
            .arg(Arg::with_name(OPT_OUTPUT)
                .long("output").short("o")
                .value_name("NAME")
                .help("Name of the file in the output directory")
                .long_help(concat!(
                    "Name of the file to write in the output directory.\n\n",
                    "By default, it's the template name prefixed with `meme_`. ",
                    "The image format follows its extension."))))
        .subcommand(caption_args(SubCommand::with_name(CMD_MEMEURL)
            .about("Caption an image from the web")
            .arg(Arg::with_name(ARG_URL)
                .value_name("URL")
                .required(true)
                .help("Address of the source image")))
            .arg(Arg::with_name(OPT_OUTPUT)
                .long("output").short("o")
                .value_name("PATH")
                .required(true)
                .help("File to write the captioned image to")))

        // Resource locations.
        .arg(Arg::with_name(OPT_TEMPLATES_DIR)
            .long("templates-dir")
            .value_name("DIR")
            .env("MEME_TEMPLATES_DIR")
            .global(true)
            .help("Directory with the templates"))
        .arg(Arg::with_name(OPT_OUTPUT_DIR)
            .long("output-dir")
            .value_name("DIR")
            .env("MEME_OUTPUT_DIR")
            .global(true)
            .help("Directory where captioned templates are written"))
        .arg(Arg::with_name(OPT_FONT)
            .long("font")
            .value_name("PATH")
            .env("MEME_FONT")
            .global(true)
            .help("TrueType font to render captions with")
            .long_help(concat!(
                "TrueType/OpenType font file to render captions with.\n\n",
                "If it cannot be loaded, a built-in bitmap font is used instead.")))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .global(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .global(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}

/// Add the caption text arguments to a subcommand.
fn caption_args<'p>(subcommand: Parser<'p>) -> Parser<'p> {
    subcommand
        .arg(Arg::with_name(ARG_TEXT)
            .value_name("TEXT")
            .required(false)
            .help("Caption text as `top text | bottom text`"))
        .arg(Arg::with_name(OPT_TOP)
            .long("top").short("t")
            .value_name("TEXT")
            .help("Text at the top of the image"))
        .arg(Arg::with_name(OPT_BOTTOM)
            .long("bottom").short("b")
            .value_name("TEXT")
            .help("Text at the bottom of the image"))
}
