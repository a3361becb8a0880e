//! Generation-by-generation grammar rewriting.
//!
//! Rewriting is strictly breadth-first: a generation scans the previous string
//! once from left to right and never re-expands its own output. There is no
//! size cap; callers bound growth by bounding the generation count.

use crate::rules::RuleMap;
use crate::tokenizer::tokenize;

/// Applies one generation of `rules` to `input`.
///
/// Every uppercase symbol with a rule is replaced together with its parameter
/// list. Everything else is copied through verbatim.
pub fn rewrite_once(input: &str, rules: &RuleMap) -> String {
    let mut next = String::with_capacity(input.len() * 2);
    for token in tokenize(input) {
        match rules.get(token.symbol).filter(|_| token.is_rewritable()) {
            Some(replacement) => next.push_str(replacement),
            None => next.push_str(token.text),
        }
    }
    next
}

/// Rewrites `premise` for `generations` generations.
///
/// Generation `0` returns the premise unchanged.
pub fn rewrite(premise: &str, rules: &RuleMap, generations: usize) -> String {
    let mut current = premise.to_string();
    for _ in 0..generations {
        current = rewrite_once(&current, rules);
    }
    tracing::debug!(generations, len = current.len(), "rewrite complete");
    current
}

/// Lazy sequence of `(generation, string)` pairs for generations `1..=N`.
///
/// Generation `n + 1` is only computed when the consumer pulls it, so a host
/// can interleave other work (repainting partial results, for instance)
/// between generations, or stop early by dropping the iterator. The sequence
/// is finite and cannot be restarted.
#[derive(Clone, Debug)]
pub struct Generations<'r> {
    current: String,
    rules: &'r RuleMap,
    generation: usize,
    target: usize,
}

impl<'r> Generations<'r> {
    pub fn new(premise: &str, rules: &'r RuleMap, generations: usize) -> Self {
        Self {
            current: premise.to_string(),
            rules,
            generation: 0,
            target: generations,
        }
    }

    /// Index of the last generation produced (`0` before the first pull).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The most recently produced string (the premise before the first pull).
    pub fn current(&self) -> &str {
        &self.current
    }
}

impl Iterator for Generations<'_> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.generation >= self.target {
            return None;
        }
        self.current = rewrite_once(&self.current, self.rules);
        self.generation += 1;
        tracing::trace!(
            generation = self.generation,
            len = self.current.len(),
            "generation rewritten"
        );
        Some((self.generation, self.current.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.target - self.generation;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Generations<'_> {}
