/// The shape of a compiled option declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `-name`: a boolean switch taking no values.
    Flag,
    /// `-name %d %s ..`: takes precisely one value per type code.
    Regular,
    /// `%*`, `""` or `-name %*`: collects trailing bare tokens for a callback.
    Sublist,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The scalar type of one value expected by a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// `%d`: a 32 bit signed integer.
    Integer,
    /// `%f` or `%g`: a single precision float.
    Float,
    /// `%F`: a double precision float.
    Double,
    /// `%s` or `%S`: a string, overwritten on each match.
    String,
    /// `%L`: a string, appended to (space separated) on each match.
    StringAppend,
    /// The implicit value of a flag.
    Boolean,
}

impl TypeCode {
    /// Map a declaration code character onto its type code.
    /// Returns `None` for unrecognized characters (including the sublist marker `*`).
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'd' => Some(TypeCode::Integer),
            'f' | 'g' => Some(TypeCode::Float),
            'F' => Some(TypeCode::Double),
            's' | 'S' => Some(TypeCode::String),
            'L' => Some(TypeCode::StringAppend),
            _ => None,
        }
    }

    /// The kind of storage a value of this type is written into.
    pub fn slot_kind(&self) -> SlotKind {
        match self {
            TypeCode::Integer => SlotKind::Integer,
            TypeCode::Float => SlotKind::Float,
            TypeCode::Double => SlotKind::Double,
            TypeCode::String | TypeCode::StringAppend => SlotKind::Text,
            TypeCode::Boolean => SlotKind::Boolean,
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeCode::Integer => "i32",
            TypeCode::Float => "f32",
            TypeCode::Double => "f64",
            TypeCode::String => "String",
            TypeCode::StringAppend => "String (append)",
            TypeCode::Boolean => "bool",
        };
        write!(f, "{name}")
    }
}

/// The kind of caller storage bound to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// `&mut i32`
    Integer,
    /// `&mut f32`
    Float,
    /// `&mut f64`
    Double,
    /// `&mut String`
    Text,
    /// `&mut bool`
    Boolean,
    /// A sublist callback.
    Callback,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SlotKind::Integer => "&mut i32",
            SlotKind::Float => "&mut f32",
            SlotKind::Double => "&mut f64",
            SlotKind::Text => "&mut String",
            SlotKind::Boolean => "&mut bool",
            SlotKind::Callback => "callback",
        };
        write!(f, "{name}")
    }
}
