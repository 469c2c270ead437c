//! HTTP Handlers

mod evaluation;
mod novel;
mod ping;
mod settings;

pub use evaluation::*;
pub use novel::*;
pub use ping::*;
pub use settings::*;
