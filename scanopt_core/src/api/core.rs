#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{Conversion, OptionSpec};
use crate::compiler::Declaration;
use crate::parser::{ArgParser, ConfigError, ConsoleInterface, OptionDescriptor, Parser, UserInterface};

/// The registry of options, from which the command line parser is built.
///
/// ### Example
/// ```
/// # use scanopt_core as scanopt;
/// use scanopt::{OptionRegistry, OptionSpec};
///
/// let mut count: i32 = 0;
/// let mut name = String::default();
/// let parser = OptionRegistry::new()
///     .add(OptionSpec::new("-x %d %s").bind(&mut count).bind(&mut name))
///     .build_parser()
///     .unwrap();
///
/// let summary = parser.parse_tokens(&["-x", "5", "hello"]);
/// assert!(summary.is_success());
/// assert_eq!(summary.times_matched("-x"), 1);
/// assert_eq!(count, 5);
/// assert_eq!(name, "hello");
/// ```
#[derive(Debug)]
pub struct OptionRegistry<'a> {
    descriptors: Vec<OptionDescriptor<'a>>,
    conversion: Conversion,
    deferred_error: Option<ConfigError>,
}

impl<'a> Default for OptionRegistry<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> OptionRegistry<'a> {
    /// Create an empty option registry.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::default(),
            conversion: Conversion::default(),
            deferred_error: None,
        }
    }

    /// Register an option.
    ///
    /// The declaration is compiled and its bindings are checked against the declared type codes.
    /// Registration stops at the first error (ex: a repeated flag); every later `add` is ignored and the error is reported by [`OptionRegistry::build_parser`].
    ///
    /// ### Example
    /// ```
    /// # use scanopt_core as scanopt;
    /// use scanopt::{ConfigError, OptionRegistry, OptionSpec};
    ///
    /// let mut a = false;
    /// let mut b = false;
    /// let result = OptionRegistry::new()
    ///     .add(OptionSpec::flag("-v", &mut a))
    ///     .add(OptionSpec::flag("-v", &mut b))
    ///     .build_parser();
    ///
    /// assert_eq!(result.unwrap_err(), ConfigError::DuplicateOption("-v".to_string()));
    /// ```
    pub fn add(mut self, spec: OptionSpec<'a>) -> Self {
        if self.deferred_error.is_none() {
            if let Err(error) = self.register(spec) {
                self.deferred_error.replace(error);
            }
        }

        self
    }

    /// Require numeric parameters to convert in full, failing the parse otherwise.
    /// By default, numeric parameters convert permissively (see [`Conversion::Permissive`]).
    pub fn strict(mut self) -> Self {
        self.conversion = Conversion::Strict;
        self
    }

    /// Set how numeric parameters are converted.
    pub fn conversion(mut self, conversion: Conversion) -> Self {
        self.conversion = conversion;
        self
    }

    fn register(&mut self, spec: OptionSpec<'a>) -> Result<(), ConfigError> {
        let (text, bindings) = spec.consume();
        let declaration =
            Declaration::compile(text.clone()).map_err(|fault| ConfigError::MalformedDeclaration {
                declaration: text,
                fault,
            })?;

        if self
            .descriptors
            .iter()
            .any(|descriptor| descriptor.flag() == declaration.flag())
        {
            return Err(ConfigError::DuplicateOption(
                declaration.display_name().to_string(),
            ));
        }

        let descriptor = OptionDescriptor::bind(declaration, bindings)?;
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registered '{}' as a {} option.",
                descriptor.declaration().text(),
                descriptor.declaration().kind()
            );
        }

        self.descriptors.push(descriptor);
        Ok(())
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<ArgParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let parser = Parser::new(self.descriptors, self.conversion);
        Ok(ArgParser::new(parser, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the registration and reports its first error (ex: a repeated flag).
    pub fn build_parser(self) -> Result<ArgParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the registration and reports its first error (ex: a repeated flag).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> ArgParser<'a> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a command line parser that reports errors only through its [`ParseSummary`](crate::ParseSummary), printing nothing.
    ///
    /// ### Example
    /// ```
    /// # use scanopt_core as scanopt;
    /// use scanopt::{OptionRegistry, OptionSpec, ParseError};
    ///
    /// let mut verbose = false;
    /// let parser = OptionRegistry::new()
    ///     .add(OptionSpec::flag("-v", &mut verbose))
    ///     .build_silent_parser()
    ///     .unwrap();
    ///
    /// let summary = parser.parse_tokens(&["-q"]);
    /// assert_eq!(summary.error(), Some(&ParseError::UnknownOption("-q".to_string())));
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn build_silent_parser(self) -> Result<ArgParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(crate::parser::SilentInterface::default()))
    }
}
