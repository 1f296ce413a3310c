pub(crate) const ANONYMOUS_SUBLIST: &str = "%*";
pub(crate) const FLAG_PREFIX: char = '-';
pub(crate) const CODE_PREFIX: char = '%';
pub(crate) const SUBLIST_CODE: char = '*';
