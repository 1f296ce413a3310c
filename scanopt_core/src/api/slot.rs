use crate::model::SlotKind;

/// The callback bound to a sublist option.
///
/// Receives the bare tokens collected for the sublist, in command line order.
/// Returning `Err` fails the parse with the provided message.
pub type SublistCallback<'a> = Box<dyn FnMut(&[String]) -> Result<(), String> + 'a>;

/// Caller owned storage that an option writes its values into.
///
/// Each variant carries a strongly typed reference, so the storage type is checked against the declaration's type codes at registration.
/// Usually created implicitly via `From`, for example `OptionSpec::new("-n %d").bind(&mut n)`.
pub enum Slot<'a> {
    /// Storage for `%d`.
    Integer(&'a mut i32),
    /// Storage for `%f` and `%g`.
    Float(&'a mut f32),
    /// Storage for `%F`.
    Double(&'a mut f64),
    /// Storage for `%s`, `%S` and `%L`.
    Text(&'a mut String),
    /// Storage for a flag.
    Boolean(&'a mut bool),
}

impl<'a> Slot<'a> {
    /// The kind of storage behind this slot.
    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Integer(_) => SlotKind::Integer,
            Slot::Float(_) => SlotKind::Float,
            Slot::Double(_) => SlotKind::Double,
            Slot::Text(_) => SlotKind::Text,
            Slot::Boolean(_) => SlotKind::Boolean,
        }
    }
}

impl<'a> std::fmt::Debug for Slot<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Integer(v) => write!(f, "Integer({v})"),
            Slot::Float(v) => write!(f, "Float({v})"),
            Slot::Double(v) => write!(f, "Double({v})"),
            Slot::Text(v) => write!(f, "Text({v:?})"),
            Slot::Boolean(v) => write!(f, "Boolean({v})"),
        }
    }
}

impl<'a> From<&'a mut i32> for Slot<'a> {
    fn from(value: &'a mut i32) -> Self {
        Slot::Integer(value)
    }
}

impl<'a> From<&'a mut f32> for Slot<'a> {
    fn from(value: &'a mut f32) -> Self {
        Slot::Float(value)
    }
}

impl<'a> From<&'a mut f64> for Slot<'a> {
    fn from(value: &'a mut f64) -> Self {
        Slot::Double(value)
    }
}

impl<'a> From<&'a mut String> for Slot<'a> {
    fn from(value: &'a mut String) -> Self {
        Slot::Text(value)
    }
}

impl<'a> From<&'a mut bool> for Slot<'a> {
    fn from(value: &'a mut bool) -> Self {
        Slot::Boolean(value)
    }
}

/// One binding of an [`OptionSpec`](crate::OptionSpec): either value storage or a sublist callback.
pub enum Binding<'a> {
    /// Value storage for a flag or regular option.
    Slot(Slot<'a>),
    /// The callback of a sublist option.
    Callback(SublistCallback<'a>),
}

impl<'a> Binding<'a> {
    /// The kind of storage behind this binding.
    pub fn kind(&self) -> SlotKind {
        match self {
            Binding::Slot(slot) => slot.kind(),
            Binding::Callback(_) => SlotKind::Callback,
        }
    }
}

impl<'a> std::fmt::Debug for Binding<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Slot(slot) => write!(f, "Slot({slot:?})"),
            Binding::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}
