use thiserror::Error;

use crate::constant::*;
use crate::model::{OptionKind, SlotKind, TypeCode};

/// The reason a declaration string cannot be compiled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeclarationFault {
    /// The declaration does not begin with `-`.
    #[error("must begin with '-'")]
    MissingDash,

    /// The leading `-` is not followed by an alphabetic character.
    #[error("'-' must be followed by an alphabetic character")]
    MissingLetter,

    /// A `%` appears without a following type code.
    #[error("'%' must be followed by a type code")]
    DanglingPercent,

    /// A `%<code>` uses an unknown code character.
    #[error("unrecognized type code '%{0}'")]
    UnrecognizedTypeCode(char),

    /// Text other than `%<code>` tokens follows the flag name.
    #[error("unexpected text '{0}' (expected '%<code>')")]
    UnexpectedText(String),

    /// `%*` is combined with other type codes.
    #[error("'%*' must be the only type code")]
    MisplacedSublist,
}

/// A compiled option declaration.
///
/// Compiled from a scanf-like string such as `"-size %d %d"`:
/// * `""` or `"%*"`: the anonymous sublist, which collects any bare tokens not claimed by a named sublist.
/// * `"-name"`: a flag.
/// * `"-name %d %f %F %s %S %L"`: a regular option with one value per code.
/// * `"-name %*"`: a named sublist.
///
/// Whitespace between `%<code>` tokens is ignored, as is trailing whitespace.
/// So `"-name "` is a flag (bound to a `bool`), not a regular option taking zero values.
///
/// ### Example
/// ```
/// # use scanopt_core as scanopt;
/// use scanopt::{Declaration, OptionKind, TypeCode};
///
/// let declaration = Declaration::compile("-size %d %d").unwrap();
/// assert_eq!(declaration.flag(), "-size");
/// assert_eq!(declaration.kind(), OptionKind::Regular);
/// assert_eq!(declaration.codes(), &[TypeCode::Integer, TypeCode::Integer]);
///
/// let declaration = Declaration::compile("-v ").unwrap();
/// assert_eq!(declaration.flag(), "-v");
/// assert_eq!(declaration.kind(), OptionKind::Flag);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    text: String,
    kind: OptionKind,
    flag: String,
    codes: Vec<TypeCode>,
}

impl Declaration {
    /// Compile a declaration string.
    pub fn compile(text: impl Into<String>) -> Result<Self, DeclarationFault> {
        let text = text.into();

        if text.is_empty() || text == ANONYMOUS_SUBLIST {
            return Ok(Self {
                text,
                kind: OptionKind::Sublist,
                flag: String::default(),
                codes: Vec::default(),
            });
        }

        let mut chars = text.chars();

        if chars.next() != Some(FLAG_PREFIX) {
            return Err(DeclarationFault::MissingDash);
        }

        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(DeclarationFault::MissingLetter),
        }

        let flag_length = text
            .find(|c: char| !(c == FLAG_PREFIX || c == '_' || c.is_ascii_alphanumeric()))
            .unwrap_or(text.len());
        let flag = text[..flag_length].to_string();
        let (kind, codes) = compile_codes(text[flag_length..].trim_end())?;

        Ok(Self {
            text,
            kind,
            flag,
            codes,
        })
    }

    /// The original declaration string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The kind of option this declaration describes.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The flag token matched on the command line (empty for the anonymous sublist).
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// The type codes of the values a regular option takes (empty for flags and sublists).
    pub fn codes(&self) -> &[TypeCode] {
        &self.codes
    }

    /// Whether this is the anonymous (default) sublist.
    pub fn is_anonymous(&self) -> bool {
        self.flag.is_empty()
    }

    /// The storage, in order, that must be bound to this declaration.
    pub fn binding_kinds(&self) -> Vec<SlotKind> {
        match self.kind {
            OptionKind::Flag => vec![SlotKind::Boolean],
            OptionKind::Regular => self.codes.iter().map(TypeCode::slot_kind).collect(),
            OptionKind::Sublist => vec![SlotKind::Callback],
        }
    }

    /// The name used for this declaration in diagnostics.
    pub(crate) fn display_name(&self) -> &str {
        if self.is_anonymous() {
            ANONYMOUS_SUBLIST
        } else {
            &self.flag
        }
    }
}

fn compile_codes(remainder: &str) -> Result<(OptionKind, Vec<TypeCode>), DeclarationFault> {
    if remainder.is_empty() {
        return Ok((OptionKind::Flag, Vec::default()));
    }

    let mut codes = Vec::default();
    let mut sublist = false;
    let mut chars = remainder.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c != CODE_PREFIX {
            let end = remainder[offset..]
                .find(char::is_whitespace)
                .map_or(remainder.len(), |i| offset + i);
            return Err(DeclarationFault::UnexpectedText(
                remainder[offset..end].to_string(),
            ));
        }

        match chars.next() {
            None => return Err(DeclarationFault::DanglingPercent),
            Some((_, SUBLIST_CODE)) => {
                if sublist || !codes.is_empty() {
                    return Err(DeclarationFault::MisplacedSublist);
                }

                sublist = true;
            }
            Some((_, code)) => match TypeCode::from_code(code) {
                Some(type_code) => {
                    if sublist {
                        return Err(DeclarationFault::MisplacedSublist);
                    }

                    codes.push(type_code);
                }
                None if code.is_whitespace() => return Err(DeclarationFault::DanglingPercent),
                None => return Err(DeclarationFault::UnrecognizedTypeCode(code)),
            },
        }
    }

    if sublist {
        Ok((OptionKind::Sublist, codes))
    } else {
        Ok((OptionKind::Regular, codes))
    }
}
