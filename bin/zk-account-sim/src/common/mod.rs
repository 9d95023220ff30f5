mod error;
mod input;
mod logging;

pub use error::*;
pub use input::*;
pub use logging::*;
