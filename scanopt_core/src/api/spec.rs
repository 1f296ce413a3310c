use crate::api::{Binding, Slot};
use crate::constant::ANONYMOUS_SUBLIST;

/// The specification of one option: its declaration string, followed by its bindings in declaration order.
///
/// The declaration grammar is described on [`Declaration`](crate::Declaration).
/// Bindings are checked against the declaration when the spec is added to an [`OptionRegistry`](crate::OptionRegistry).
///
/// ### Example
/// ```
/// # use scanopt_core as scanopt;
/// use scanopt::OptionSpec;
///
/// let mut width: i32 = 0;
/// let mut height: i32 = 0;
/// let mut verbose = false;
/// let mut files: Vec<String> = Vec::default();
///
/// let size_spec = OptionSpec::new("-size %d %d")
///     .bind(&mut width)
///     .bind(&mut height);
/// let verbose_spec = OptionSpec::flag("-v", &mut verbose);
/// let files_spec = OptionSpec::global(|arguments: &[String]| {
///     files.extend_from_slice(arguments);
///     Ok(())
/// });
/// ```
#[derive(Debug)]
pub struct OptionSpec<'a> {
    declaration: String,
    bindings: Vec<Binding<'a>>,
}

impl<'a> OptionSpec<'a> {
    /// Create an option spec from its declaration string, without any bindings.
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            bindings: Vec::default(),
        }
    }

    /// Create a flag option spec (ex: `-v`) bound to a `bool`.
    pub fn flag(declaration: impl Into<String>, variable: &'a mut bool) -> Self {
        Self::new(declaration).bind(variable)
    }

    /// Create the anonymous sublist spec (`%*`), which collects every bare token not claimed by a named sublist.
    pub fn global(callback: impl FnMut(&[String]) -> Result<(), String> + 'a) -> Self {
        Self::new(ANONYMOUS_SUBLIST).callback(callback)
    }

    /// Bind the next value of the declaration to caller storage.
    pub fn bind(mut self, slot: impl Into<Slot<'a>>) -> Self {
        self.bindings.push(Binding::Slot(slot.into()));
        self
    }

    /// Bind the callback of a sublist declaration.
    pub fn callback(mut self, callback: impl FnMut(&[String]) -> Result<(), String> + 'a) -> Self {
        self.bindings.push(Binding::Callback(Box::new(callback)));
        self
    }

    pub(crate) fn consume(self) -> (String, Vec<Binding<'a>>) {
        (self.declaration, self.bindings)
    }
}
