use std::env;

use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::ErrorContext;

/// The configured command line parser.
/// Built via [`OptionRegistry::build`](crate::OptionRegistry::build) or [`OptionRegistry::build_parser`](crate::OptionRegistry::build_parser).
///
/// Parsing consumes the parser, releasing every borrow of the bound variables.
pub struct ArgParser<'a> {
    parser: Parser<'a>,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for ArgParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgParser")
            .field("parser", &self.parser)
            .finish()
    }
}

impl<'a> ArgParser<'a> {
    pub(crate) fn new(parser: Parser<'a>, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            parser,
            user_interface,
        }
    }

    /// Run the command line parser against the input tokens (program name excluded).
    ///
    /// Parsing happens in two phases:
    /// 1. Scanning walks the tokens left to right.
    /// Flags and regular options write into their bound variables as they are matched, while bare tokens are collected by the active sublist.
    /// 2. Once every token is scanned, each sublist that collected at least one token has its callback invoked, in registration order.
    ///
    /// If at any point the parser encounters an error (ex: unknown option, missing parameter, failing callback), parsing stops.
    /// The error is printed to stderr along with the offending position, and reported in the returned [`ParseSummary`].
    /// Variables written before the error keep their new values.
    pub fn parse_tokens(self, tokens: &[&str]) -> ParseSummary {
        let ArgParser {
            mut parser,
            user_interface,
        } = self;

        let result = parser
            .consume(tokens)
            .and_then(|_| parser.invoke_callbacks());
        let error = match result {
            Ok(()) => None,
            Err((offset, parse_error)) => {
                user_interface.print_error(parse_error.clone());
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                Some(parse_error)
            }
        };

        ParseSummary {
            matches: parser.match_counts(),
            error,
        }
    }

    /// Run the command line parser against a full argument vector, whose first element (the program name) is skipped.
    ///
    /// See [`ArgParser::parse_tokens`] for details.
    pub fn parse_argv<S: AsRef<str>>(self, argv: &[S]) -> ParseSummary {
        let tokens: Vec<&str> = argv.iter().skip(1).map(AsRef::as_ref).collect();
        self.parse_tokens(tokens.as_slice())
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// See [`ArgParser::parse_tokens`] for details.
    /// If the parser encounters an error, it will exit with error code `1` (via [`std::process::exit`]).
    pub fn parse(self) -> ParseSummary {
        let argv: Vec<String> = env::args().collect();
        let summary = self.parse_argv(argv.as_slice());

        if !summary.is_success() {
            std::process::exit(1);
        }

        summary
    }
}

/// The outcome of a parse: how many times each option matched, and the error (if any) that stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSummary {
    matches: Vec<(String, usize)>,
    error: Option<ParseError>,
}

impl ParseSummary {
    /// The number of times the option with this flag was matched on the command line.
    ///
    /// A regular option counts once all of its parameters are consumed, while flags and sublists count once recognized.
    /// The anonymous sublist is looked up by `"%*"` (or `""`), and never counts since it is never named.
    /// Unregistered flags count zero.
    pub fn times_matched(&self, flag: &str) -> usize {
        let flag = if flag == crate::constant::ANONYMOUS_SUBLIST {
            ""
        } else {
            flag
        };

        self.matches
            .iter()
            .find(|(f, _)| f == flag)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// The text of the error that stopped the parse, or the empty string after a successful parse.
    pub fn last_error(&self) -> String {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The error that stopped the parse, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Whether every token was accepted and every callback succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a Result, for use with `?`.
    pub fn into_result(self) -> Result<(), ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
