mod capture;
mod core;
mod slot;
mod spec;

pub use self::core::*;
pub use capture::Conversion;
pub(crate) use capture::InvalidConversion;
pub use slot::*;
pub use spec::*;
