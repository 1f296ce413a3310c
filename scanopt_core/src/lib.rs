//! Engine module for `scanopt`.
//! See [documentation root](https://docs.rs/scanopt/latest/scanopt/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod compiler;
mod constant;
mod model;
mod parser;

pub use api::{Binding, Conversion, OptionRegistry, OptionSpec, Slot, SublistCallback};
pub use compiler::{Declaration, DeclarationFault};
pub use model::*;
pub use parser::{ArgParser, ConfigError, ParseError, ParseSummary};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
