//! Rule slots (`"A=FFFB"`) and the symbol → replacement map built from them.

use std::collections::HashMap;

/// Mapping from a rewritable symbol to its replacement string.
///
/// Symbols absent from the map are terminals and are copied through unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleMap {
    rules: HashMap<char, String>,
}

impl RuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule (builder pattern). A later rule for the same symbol wins.
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.insert(symbol, replacement);
        self
    }

    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// Replacement for `symbol`, if it has a rule.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds a map from editable rule slots of the form `<symbol>=<replacement>`.
    ///
    /// Each slot is split on its first `=`. Empty slots, slots without `=`, and
    /// slots whose key is not exactly one character are ignored. Keys and
    /// values are trimmed.
    pub fn from_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for slot in slots {
            let slot = slot.as_ref();
            let Some((key, value)) = slot.split_once('=') else {
                if !slot.trim().is_empty() {
                    tracing::debug!(slot, "ignoring rule slot without '='");
                }
                continue;
            };
            let mut chars = key.trim().chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                tracing::debug!(slot, "ignoring rule slot without a single-symbol key");
                continue;
            };
            map.insert(symbol, value.trim());
        }
        map
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for RuleMap {
    fn from_iter<T: IntoIterator<Item = (char, S)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}
