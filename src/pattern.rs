//! The regular-expression dialect used by `pattern`, `patternProperties` and
//! `format: regex`.
//!
//! Patterns are compiled with the `regex` crate after rewriting the ECMA-262
//! shorthand classes `\d`, `\D`, `\w` and `\W` to their ASCII meaning.
//! Lookaround and backreferences are not available in this dialect; such
//! patterns fail to compile and are reported as schema defects.

use std::collections::HashMap;

use parking_lot::RwLock;
use regex::Regex;

/// Compiles a pattern in the shared dialect.
pub(crate) fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&translate(pattern))
}

/// Rewrites ECMA-262 shorthand classes to explicit ASCII classes.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('d') if in_class => out.push_str("0-9"),
                Some('w') if in_class => out.push_str("A-Za-z0-9_"),
                Some('d') => out.push_str("[0-9]"),
                Some('D') => out.push_str("[^0-9]"),
                Some('w') => out.push_str("[A-Za-z0-9_]"),
                Some('W') => out.push_str("[^A-Za-z0-9_]"),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '[' if in_class => out.push_str("\\["),
            '[' => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Compiled patterns shared by every validation run of one validator.
///
/// Compile failures are cached too, so a bad pattern is reported on every
/// run without being recompiled.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: RwLock<HashMap<String, Option<Regex>>>,
}

impl PatternCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled pattern, or None if it is not valid in the dialect.
    pub(crate) fn get(&self, pattern: &str) -> Option<Regex> {
        if let Some(cached) = self.compiled.read().get(pattern) {
            return cached.clone();
        }
        let compiled = compile(pattern).ok();
        self.compiled
            .write()
            .insert(pattern.to_string(), compiled.clone());
        compiled
    }
}
