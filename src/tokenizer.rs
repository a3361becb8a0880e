//! Parametric symbol tokenizer.
//!
//! A symbol string is a sequence of command characters, each optionally
//! followed by a parenthesized list of numeric literals: `F(1.2,0.05)+(30)A`.
//! Only plain literals are accepted; the content of a parameter list is never
//! evaluated as an expression.
//!
//! Malformed lists never fail. They degrade to "no parameters" so callers fall
//! back to their defaults.

/// Outcome of scanning for a parameter list at a given byte offset.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamScan {
    /// The character at the offset is not `(`.
    Absent,
    /// A `(` with no closing `)` anywhere after it.
    Unterminated,
    /// A closed list that is empty or holds a non-numeric entry.
    /// `end` is the offset just past the `)`.
    Malformed { end: usize },
    /// A closed list of finite numbers. `end` is the offset just past the `)`.
    Values { values: Vec<f32>, end: usize },
}

/// Scans the parameter list (if any) starting at byte offset `index`.
///
/// `index` should point immediately after a command symbol.
pub fn scan_params(input: &str, index: usize) -> ParamScan {
    let Some(rest) = input.get(index..) else {
        return ParamScan::Absent;
    };
    if !rest.starts_with('(') {
        return ParamScan::Absent;
    }
    let Some(close) = rest.find(')') else {
        tracing::debug!(index, "unterminated parameter list");
        return ParamScan::Unterminated;
    };

    let content = &rest[1..close];
    let end = index + close + 1;
    if content.trim().is_empty() {
        return ParamScan::Malformed { end };
    }

    let mut values = Vec::new();
    for part in content.split(',') {
        match part.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => {
                tracing::debug!(index, content, "invalid number in parameter list");
                return ParamScan::Malformed { end };
            }
        }
    }
    ParamScan::Values { values, end }
}

/// Parses the parameter list at `index`, falling back to `defaults`.
///
/// Returns the values and the offset of the next unread character. When no
/// list is present, or the `(` is never closed, the offset is returned
/// unchanged; the caller must still advance past the `(` on its own.
pub fn parse_params(input: &str, index: usize, defaults: &[f32]) -> (Vec<f32>, usize) {
    match scan_params(input, index) {
        ParamScan::Absent | ParamScan::Unterminated => (defaults.to_vec(), index),
        ParamScan::Malformed { end } => (defaults.to_vec(), end),
        ParamScan::Values { values, end } => (values, end),
    }
}

/// One command symbol plus its (optional) parsed arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    /// The command character.
    pub symbol: char,
    /// Parsed arguments, `None` when absent or malformed.
    pub args: Option<Vec<f32>>,
    /// The exact source text of this unit, parameter list included.
    pub text: &'a str,
}

impl Token<'_> {
    /// Returns argument `idx`, or `default` when it was not supplied.
    pub fn arg(&self, idx: usize, default: f32) -> f32 {
        self.args
            .as_ref()
            .and_then(|a| a.get(idx).copied())
            .unwrap_or(default)
    }

    /// True when the symbol is an ASCII uppercase letter (a rewritable symbol).
    pub fn is_rewritable(&self) -> bool {
        self.symbol.is_ascii_uppercase()
    }
}

/// Iterator over the [`Token`]s of a symbol string.
///
/// Every call to `next` consumes at least one character, so the iterator
/// terminates on arbitrary input.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

/// Tokenizes `input` lazily.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens { input, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let symbol = self.input.get(start..)?.chars().next()?;
        let after = start + symbol.len_utf8();

        let (args, end) = match scan_params(self.input, after) {
            ParamScan::Absent | ParamScan::Unterminated => (None, after),
            ParamScan::Malformed { end } => (None, end),
            ParamScan::Values { values, end } => (Some(values), end),
        };

        self.pos = end;
        Some(Token {
            symbol,
            args,
            text: &self.input[start..end],
        })
    }
}
