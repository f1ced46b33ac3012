//!
//! memegen -- Image macros in the shell
//!

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod logging;


use std::env;
use std::process::exit;

use exitcode::ExitCode;
use memegen::{CaptionError, Engine, EngineBuildError, EngineBuilder, TemplateError};

use crate::args::{ArgsError, Command, Options};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("memegen");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
}


fn main() {
    // Values from .env serve as defaults for the options' environment variables,
    // so they have to be loaded before parsing.
    let dotenv = dotenvy::dotenv();

    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e);
        exit(exitcode::USAGE);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {}", e);
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    match dotenv {
        Ok(path) => debug!("Environment variables loaded from {}", path.display()),
        Err(ref e) if e.not_found() => trace!("No .env file found"),
        Err(e) => warn!("Failed to load the .env file: {}", e),
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let engine = create_engine(&opts).unwrap_or_else(|e| {
        error!("Failed to set up the image macro engine: {}", e);
        exit(build_exit_code(&e));
    });
    if let Err(e) = run(&engine, opts.command) {
        error!("{}", e);
        exit(caption_exit_code(&e));
    }
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) {
    match e {
        ArgsError::Parse(ref e) if !e.use_stderr() =>
            // Help or version info that was asked for.
            println!("{}", e.message),
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            eprintln!("{}", e.message),
        e => eprintln!("Failed to parse arguments: {}", e),
    }
}


/// Create the `Engine` as configured on the command line.
fn create_engine(opts: &Options) -> Result<Engine, EngineBuildError> {
    let mut builder = EngineBuilder::new();
    if let Some(ref dir) = opts.templates_dir {
        builder = builder.template_directory(dir);
    }
    if let Some(ref dir) = opts.output_dir {
        builder = builder.output_directory(dir);
    }
    if let Some(ref path) = opts.font {
        builder = builder.font_path(path);
    }
    builder.build()
}

/// Execute given command.
fn run(engine: &Engine, command: Command) -> Result<(), CaptionError> {
    match command {
        Command::Templates => {
            let names = engine.list_templates();
            if names.is_empty() {
                info!("No templates in {}", engine.templates().directory().display());
            }
            for name in names {
                println!("{}", name);
            }
        }
        Command::Download{url, name} => {
            let path = engine.download_template(&url, &name)?;
            println!("{}", path.display());
        }
        Command::Meme{template, request, output_name} => {
            let path = engine.create_from_template(
                &template, &request.top_text, &request.bottom_text, output_name.as_deref())?;
            println!("{}", path.display());
        }
        Command::MemeUrl{url, request, output_path} => {
            let mut output = engine.create_from_url(
                &url, &request.top_text, &request.bottom_text)?;
            let path = output.save(&output_path)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}


/// Exit code for a failure to set up the `Engine`.
fn build_exit_code(error: &EngineBuildError) -> ExitCode {
    match *error {
        EngineBuildError::Directory{..} => exitcode::CANTCREAT,
        EngineBuildError::Http(..) => exitcode::UNAVAILABLE,
        _ => exitcode::CONFIG,
    }
}

/// Exit code for a failure to execute the command.
fn caption_exit_code(error: &CaptionError) -> ExitCode {
    match *error {
        CaptionError::Template(TemplateError::NotFound{..}) => exitcode::NOINPUT,
        CaptionError::Template(TemplateError::InvalidName(..)) => exitcode::USAGE,
        CaptionError::Template(TemplateError::Download{..}) => exitcode::UNAVAILABLE,
        CaptionError::Template(TemplateError::Decode{..}) => exitcode::DATAERR,
        CaptionError::Template(TemplateError::Io{..}) => exitcode::IOERR,
        CaptionError::Fetch(..) => exitcode::UNAVAILABLE,
        CaptionError::Decode{..} => exitcode::DATAERR,
        CaptionError::OutputName(..) => exitcode::USAGE,
        CaptionError::Io{..} => exitcode::CANTCREAT,
        CaptionError::Encode{..} => exitcode::SOFTWARE,
    }
}


#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use memegen::{CaptionError, FetchError, TemplateError};
    use super::caption_exit_code;

    #[test]
    fn exit_codes() {
        let not_found = CaptionError::Template(TemplateError::NotFound{
            name: "doge.png".into(),
            directory: PathBuf::from("meme_templates"),
        });
        assert_eq!(exitcode::NOINPUT, caption_exit_code(&not_found));

        let status = FetchError::Status{url: "https://x/img.jpg".into(), status: 500};
        assert_eq!(exitcode::UNAVAILABLE, caption_exit_code(&CaptionError::Fetch(status)));

        let io = CaptionError::Io{
            path: PathBuf::from("output/meme_doge.png"),
            error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(exitcode::CANTCREAT, caption_exit_code(&io));

        assert_eq!(exitcode::USAGE,
            caption_exit_code(&CaptionError::OutputName("../x.png".into())));
    }
}
