use std::fmt;

use crate::types::command::Flag;

/// Value accumulated behind a flag: one string, or a list when it held commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Single(String),
    List(Vec<String>),
}

impl ArgValue {
    /// Builds the value from the comma-joined accumulator.
    pub fn from_joined(joined: &str) -> Self {
        let parts: Vec<&str> = joined.split(',').collect();
        if parts.len() == 1 {
            ArgValue::Single(joined.to_string())
        } else {
            ArgValue::List(parts.into_iter().map(str::to_string).collect())
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            ArgValue::Single(value) => Some(value),
            ArgValue::List(_) => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Single(value) => write!(f, "{}", value),
            ArgValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Flag→value map that keeps the order flags were first typed in.
///
/// Equality ignores order, two invocations typed with the same flags in a
/// different order are the same arguments.
#[derive(Debug, Clone, Default, Eq)]
pub struct Arguments {
    entries: Vec<(String, ArgValue)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites; an overwritten flag keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks a flag up by its short spelling first, then the long one.
    pub fn flag(&self, flag: Flag) -> Option<&ArgValue> {
        self.get(flag.short()).or_else(|| self.get(flag.long()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Arguments {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    pub id: u64,
    pub command: String,
    pub arguments: Arguments,
}

impl ParsedInvocation {
    pub fn flag(&self, flag: Flag) -> Option<&ArgValue> {
        self.arguments.flag(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_joined() {
        assert_eq!(ArgValue::from_joined("100"), ArgValue::Single("100".into()));
        assert_eq!(ArgValue::from_joined(""), ArgValue::Single(String::new()));
        assert_eq!(
            ArgValue::from_joined("0xabc,100"),
            ArgValue::List(vec!["0xabc".into(), "100".into()])
        );
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut args = Arguments::new();
        args.insert("-m", ArgValue::Single("a".into()));
        args.insert("-a", ArgValue::Single("1".into()));
        args.insert("-m", ArgValue::Single("b".into()));

        let keys: Vec<&str> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["-m", "-a"]);
        assert_eq!(args.get("-m"), Some(&ArgValue::Single("b".into())));
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut left = Arguments::new();
        left.insert("-m", ArgValue::Single("a".into()));
        left.insert("-a", ArgValue::Single("1".into()));

        let mut right = Arguments::new();
        right.insert("-a", ArgValue::Single("1".into()));
        right.insert("-m", ArgValue::Single("a".into()));

        assert_eq!(left, right);

        right.insert("-d", ArgValue::Single("true".into()));
        assert_ne!(left, right);
    }

    #[test]
    fn test_flag_prefers_short_spelling() {
        let mut args = Arguments::new();
        args.insert("--method", ArgValue::Single("long".into()));
        args.insert("-m", ArgValue::Single("short".into()));
        assert_eq!(
            args.flag(Flag::Method),
            Some(&ArgValue::Single("short".into()))
        );
        assert_eq!(args.flag(Flag::Args), None);
    }
}
