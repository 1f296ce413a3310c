mod base;
mod context;
mod interface;
mod middleware;

pub use base::{ConfigError, ParseError};
pub(crate) use base::{OptionDescriptor, Parser};
pub(crate) use context::ErrorContext;
#[cfg(feature = "unit_test")]
pub(crate) use interface::SilentInterface;
pub(crate) use interface::{ConsoleInterface, UserInterface};
pub use middleware::{ArgParser, ParseSummary};

#[cfg(test)]
pub(crate) use interface::util;
