//! Module defining the model types.

mod align;
mod caption;
mod color;

pub use self::align::VAlign;
pub use self::caption::CaptionRequest;
pub use self::color::Color;
