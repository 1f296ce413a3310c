//! `scanopt` is a declarative command line option parser for Rust.
//!
//! Options are declared with terse scanf-like strings (ex: `"-size %d %d"`), and each declared value is bound directly to a variable of the caller.
//! The command line is then scanned in a single left to right pass, writing into those variables as options are matched.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/convert.rs")]
//! ```
//!
//! ```console
//! $ convert -quality 75 -filter sharpen -o out.png a.png -filter blur b.png
//! Converting ["a.png", "b.png"] into 'out.png' (quality: 75, scale: 1, filters: 'sharpen blur').
//!
//! $ convert -q
//! Parse error: invalid option '-q'.
//! -q
//! ^
//!
//! $ convert -quality
//! Parse error: missing parameter 1 from option '-quality'.
//! -quality
//!        ^
//! ```
//!
//! # Declarations
//! Each option is described by an [`OptionSpec`]: its declaration string, followed by its bindings in declaration order.
//!
//! | Declaration | Kind | Bindings |
//! |-|-|-|
//! | `"-v"` | flag | `&mut bool`, set to `true` when present |
//! | `"-n %d"` | regular | `&mut i32` |
//! | `"-r %f"`, `"-r %g"` | regular | `&mut f32` |
//! | `"-r %F"` | regular | `&mut f64` |
//! | `"-o %s"`, `"-o %S"` | regular | `&mut String`, overwritten |
//! | `"-I %L"` | regular | `&mut String`, appended to (space separated) |
//! | `"-files %*"` | named sublist | callback |
//! | `""`, `"%*"` | anonymous sublist | callback |
//!
//! A regular option may declare several values (ex: `"-size %d %d"`), each consuming the next token on the command line.
//! Flags are matched by exact text only (no abbreviations, no `-abc` clustering).
//!
//! # Sublists
//! Any token that does not look like an option (`-` followed by a letter or `-`) is a bare token, and is collected by the *active global* sublist.
//! * The anonymous sublist (see [`OptionSpec::global`]) is active from the start.
//! * A named sublist becomes active where it appears, replacing the previously active global.
//! It remains active until the next flag or regular option, after which bare tokens are rejected.
//!
//! Once the whole command line is scanned, each sublist that collected tokens has its callback invoked, in registration order.
//! ```no_run
#![doc = include_str!("../demos/globals.rs")]
//! ```
//!
//! # Conversion
//! By default, numeric values convert permissively in the manner of C's `atoi`/`atof` (ex: `"12abc"` converts to `12`, and `"abc"` to `0`).
//! Use [`OptionRegistry::strict`] to instead reject values that don't convert in full.
//!
//! # Errors
//! Registration errors ([`ConfigError`]) are reported when the parser is built, while command line errors ([`ParseError`]) are reported by the [`ParseSummary`] of the parse.
//! [`OptionRegistry::build`] and [`ArgParser::parse`] exit the process on error, whereas [`OptionRegistry::build_parser`] and [`ArgParser::parse_tokens`] leave the decision to the caller.
//!
//! # Features
//! * `tracing_debug`: emit [`tracing`](https://docs.rs/tracing) debug events while registering and scanning.
//! * `unit_test`: enables `OptionRegistry::build_silent_parser`, for testing command line setups without printing.
pub use scanopt_core::*;
