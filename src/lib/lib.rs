//!
//! memegen  -- Captioned image macros on demand
//!

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate maplit;

#[cfg(test)] #[macro_use] extern crate spectral;


mod caption;
mod model;
mod resources;
mod session;


pub use crate::caption::*;
pub use crate::model::*;
pub use crate::resources::*;
pub use crate::session::*;
