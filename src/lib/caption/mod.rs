//! Module implementing image captioning.

mod engine;
mod error;
mod output;
mod task;
mod text;


pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Config as EngineConfig,
                       Engine};
pub use self::error::CaptionError;
pub use self::output::CaptionOutput;
pub use self::text::{horizontal_offset, CaptionRenderer, OutlineRenderer, Style};
