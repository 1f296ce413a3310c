use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{Binding, Conversion, InvalidConversion, Slot, SublistCallback};
use crate::compiler::{Declaration, DeclarationFault};
use crate::constant::FLAG_PREFIX;
use crate::model::{OptionKind, SlotKind, TypeCode};

pub(crate) type OffsetValue = (usize, String);

/// An error in the registration of options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The same flag is declared more than once.
    #[error("Config error: option '{0}' is multiply defined.")]
    DuplicateOption(String),

    /// A declaration has fewer bindings than its type codes require.
    #[error("Config error: missing binding {position} for option '{option}'.")]
    MissingBinding {
        /// The option flag (`%*` for the anonymous sublist).
        option: String,
        /// The (1-based) position of the first missing binding.
        position: usize,
    },

    /// A binding's storage type does not match its type code.
    #[error("Config error: binding {position} for option '{option}' must be {expected}, but found {provided}.")]
    MismatchedBinding {
        /// The option flag (`%*` for the anonymous sublist).
        option: String,
        /// The (1-based) position of the mismatched binding.
        position: usize,
        /// The storage the declaration requires.
        expected: SlotKind,
        /// The storage that was bound.
        provided: SlotKind,
    },

    /// A declaration has more bindings than its type codes require.
    #[error("Config error: unexpected binding {position} for option '{option}'.")]
    UnexpectedBinding {
        /// The option flag (`%*` for the anonymous sublist).
        option: String,
        /// The (1-based) position of the first surplus binding.
        position: usize,
    },

    /// A declaration string cannot be compiled.
    #[error("Config error: malformed declaration '{declaration}': {fault}.")]
    MalformedDeclaration {
        /// The declaration string.
        declaration: String,
        /// What is wrong with it.
        fault: DeclarationFault,
    },
}

/// An error while scanning the command line, or from a sublist callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option token does not match any registered flag.
    #[error("Parse error: invalid option '{0}'.")]
    UnknownOption(String),

    /// The command line ends before all of an option's parameters are provided.
    #[error("Parse error: missing parameter {position} from option '{option}'.")]
    MissingParameter {
        /// The option flag.
        option: String,
        /// The (1-based) position of the first missing parameter.
        position: usize,
    },

    /// A bare token appears while no sublist is active to collect it.
    #[error("Parse error: argument '{0}' does not have an associated option.")]
    UnassociatedArgument(String),

    /// A parameter cannot be converted (only with [`Conversion::Strict`]).
    #[error("Parse error: cannot convert '{token}' to {type_code} for option '{option}'.")]
    ValueConversion {
        /// The option flag.
        option: String,
        /// The offending parameter.
        token: String,
        /// The type the parameter is declared as.
        type_code: TypeCode,
    },

    /// A sublist callback returned an error.
    #[error("Parse error: callback for option '{option}' failed: {message}")]
    CallbackFailure {
        /// The option flag (`%*` for the anonymous sublist).
        option: String,
        /// The message returned by the callback.
        message: String,
    },
}

impl ParseError {
    fn conversion(option: &str, error: InvalidConversion) -> Self {
        let InvalidConversion { token, type_code } = error;
        ParseError::ValueConversion {
            option: option.to_string(),
            token,
            type_code,
        }
    }
}

enum Target<'a> {
    Values(Vec<(TypeCode, Slot<'a>)>),
    Callback(SublistCallback<'a>),
}

/// A compiled declaration bound to its caller storage, along with its scan state.
pub(crate) struct OptionDescriptor<'a> {
    declaration: Declaration,
    target: Target<'a>,
    match_count: usize,
    collected: Vec<OffsetValue>,
}

impl<'a> std::fmt::Debug for OptionDescriptor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("declaration", &self.declaration.text())
            .field("match_count", &self.match_count)
            .field("collected", &self.collected)
            .finish()
    }
}

impl<'a> OptionDescriptor<'a> {
    /// Bind the declaration to its storage, checking the bindings in declaration order.
    pub(crate) fn bind(
        declaration: Declaration,
        bindings: Vec<Binding<'a>>,
    ) -> Result<Self, ConfigError> {
        let option = declaration.display_name().to_string();
        let mut bindings = bindings.into_iter();

        let target = match declaration.kind() {
            OptionKind::Sublist => match bindings.next() {
                Some(Binding::Callback(callback)) => Target::Callback(callback),
                Some(binding) => {
                    return Err(ConfigError::MismatchedBinding {
                        option,
                        position: 1,
                        expected: SlotKind::Callback,
                        provided: binding.kind(),
                    });
                }
                None => {
                    return Err(ConfigError::MissingBinding {
                        option,
                        position: 1,
                    });
                }
            },
            OptionKind::Flag | OptionKind::Regular => {
                let codes = match declaration.kind() {
                    OptionKind::Flag => vec![TypeCode::Boolean],
                    _ => declaration.codes().to_vec(),
                };
                let mut values = Vec::with_capacity(codes.len());

                for (i, type_code) in codes.into_iter().enumerate() {
                    match bindings.next() {
                        Some(Binding::Slot(slot)) if slot.kind() == type_code.slot_kind() => {
                            values.push((type_code, slot));
                        }
                        Some(binding) => {
                            return Err(ConfigError::MismatchedBinding {
                                option,
                                position: i + 1,
                                expected: type_code.slot_kind(),
                                provided: binding.kind(),
                            });
                        }
                        None => {
                            return Err(ConfigError::MissingBinding {
                                option,
                                position: i + 1,
                            });
                        }
                    }
                }

                Target::Values(values)
            }
        };

        let arity = match &target {
            Target::Values(values) => values.len(),
            Target::Callback(_) => 1,
        };

        if bindings.next().is_some() {
            return Err(ConfigError::UnexpectedBinding {
                option,
                position: arity + 1,
            });
        }

        Ok(Self {
            declaration,
            target,
            match_count: 0,
            collected: Vec::default(),
        })
    }

    pub(crate) fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub(crate) fn flag(&self) -> &str {
        self.declaration.flag()
    }

    pub(crate) fn match_count(&self) -> usize {
        self.match_count
    }

    fn name(&self) -> String {
        self.declaration.display_name().to_string()
    }

    fn capture(
        &mut self,
        index: usize,
        token: &str,
        conversion: Conversion,
    ) -> Result<(), ParseError> {
        match &mut self.target {
            Target::Values(values) => {
                let (type_code, slot) = &mut values[index];
                slot.capture(*type_code, token, conversion)
                    .map_err(|error| ParseError::conversion(self.declaration.display_name(), error))
            }
            Target::Callback(_) => {
                unreachable!("internal error - a sublist cannot capture values");
            }
        }
    }

    fn invoke_callback(&mut self) -> Result<(), (usize, ParseError)> {
        let OptionDescriptor {
            declaration,
            target,
            collected,
            ..
        } = self;

        if let (Target::Callback(callback), Some((offset, _))) = (target, collected.first()) {
            let arguments: Vec<String> = collected.iter().map(|(_, value)| value.clone()).collect();
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Invoking the callback for '{}' with {} argument(s).",
                    declaration.display_name(),
                    arguments.len()
                );
            }

            callback(&arguments).map_err(|message| {
                (
                    *offset,
                    ParseError::CallbackFailure {
                        option: declaration.display_name().to_string(),
                        message,
                    },
                )
            })?;
        }

        Ok(())
    }
}

/// Whether the token names an option (as opposed to being a bare argument).
pub(crate) fn is_option_token(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some(FLAG_PREFIX)
        && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == FLAG_PREFIX)
}

/// The scanner/dispatcher over a registry of option descriptors.
///
/// Not reentrant: the active global and the per-option counters are mutated in place during a scan.
pub(crate) struct Parser<'a> {
    descriptors: Vec<OptionDescriptor<'a>>,
    flags: HashMap<String, usize>,
    global: Option<usize>,
    conversion: Conversion,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), Conversion::default())
    }

    pub(crate) fn new(descriptors: Vec<OptionDescriptor<'a>>, conversion: Conversion) -> Self {
        let mut flags = HashMap::default();

        for (i, descriptor) in descriptors.iter().enumerate() {
            if flags.insert(descriptor.flag().to_string(), i).is_some() {
                unreachable!("internal error - flags must be unique after registration");
            }
        }

        let global = descriptors
            .iter()
            .position(|descriptor| descriptor.declaration().is_anonymous());

        Self {
            descriptors,
            flags,
            global,
            conversion,
        }
    }

    /// Scan the tokens (program name excluded), mutating the bound storage as options are matched.
    /// Errors carry the offset of the offending token, measured in characters of the tokens fed so far.
    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<(), (usize, ParseError)> {
        let mut index = 0;
        let mut offset = 0;

        while let Some(token) = tokens.get(index) {
            let token_offset = offset;
            index += 1;
            offset += token.chars().count();

            if !is_option_token(token) {
                match self.global {
                    Some(global) => {
                        self.descriptors[global]
                            .collected
                            .push((token_offset, token.to_string()));
                    }
                    None => {
                        return Err((
                            token_offset,
                            ParseError::UnassociatedArgument(token.to_string()),
                        ));
                    }
                }

                continue;
            }

            let position = match self.flags.get(*token) {
                Some(position) => *position,
                None => {
                    return Err((token_offset, ParseError::UnknownOption(token.to_string())));
                }
            };

            match self.descriptors[position].declaration().kind() {
                OptionKind::Flag => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched flag '{token}'.");
                    }

                    self.deactivate_named_global();
                    let descriptor = &mut self.descriptors[position];
                    descriptor.match_count += 1;
                    descriptor
                        .capture(0, "", self.conversion)
                        .map_err(|error| (token_offset, error))?;
                }
                OptionKind::Sublist => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched sublist '{token}'; it is now the active global.");
                    }

                    self.descriptors[position].match_count += 1;
                    self.global.replace(position);
                }
                OptionKind::Regular => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched option '{token}'.");
                    }

                    self.deactivate_named_global();
                    let conversion = self.conversion;
                    let descriptor = &mut self.descriptors[position];

                    for i in 0..descriptor.declaration().codes().len() {
                        let parameter = match tokens.get(index) {
                            Some(parameter) => *parameter,
                            None => {
                                return Err((
                                    offset,
                                    ParseError::MissingParameter {
                                        option: descriptor.name(),
                                        position: i + 1,
                                    },
                                ));
                            }
                        };

                        descriptor
                            .capture(i, parameter, conversion)
                            .map_err(|error| (offset, error))?;
                        index += 1;
                        offset += parameter.chars().count();
                    }

                    descriptor.match_count += 1;
                }
            }
        }

        Ok(())
    }

    /// Invoke the callback of every sublist that collected at least one argument, in registration order.
    /// Stops at the first failing callback.
    pub(crate) fn invoke_callbacks(&mut self) -> Result<(), (usize, ParseError)> {
        for descriptor in self.descriptors.iter_mut() {
            descriptor.invoke_callback()?;
        }

        Ok(())
    }

    /// The number of times each option matched, in registration order.
    pub(crate) fn match_counts(&self) -> Vec<(String, usize)> {
        self.descriptors
            .iter()
            .map(|descriptor| (descriptor.flag().to_string(), descriptor.match_count()))
            .collect()
    }

    fn deactivate_named_global(&mut self) {
        if let Some(global) = self.global {
            if !self.descriptors[global].declaration().is_anonymous() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Deactivating the global '{}'.",
                        self.descriptors[global].flag()
                    );
                }

                self.global = None;
            }
        }
    }
}
