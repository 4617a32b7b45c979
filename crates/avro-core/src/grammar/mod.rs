//! Transliteration grammar: character classes and contextual patterns.
//!
//! A `Grammar` is decoded once from a JSON document (see `decode`) and is
//! immutable afterwards. Patterns keep their declaration order; match
//! priority is decided by the trie, not by this list.

mod decode;
mod source;

pub use decode::decode;
pub use source::{load_grammar, BytesSource, EmbeddedSource, FileSource, GrammarSource};

use std::collections::HashSet;
use std::io;

/// The bundled Avro Phonetic grammar.
pub const DEFAULT_GRAMMAR_JSON: &str = include_str!("default_grammar.json");

/// Returns the embedded default grammar document.
pub fn default_json() -> &'static str {
    DEFAULT_GRAMMAR_JSON
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pattern #{0} has an empty find sequence")]
    EmptyFind(usize),

    #[error("pattern {find:?}: unknown match type {value:?}")]
    UnknownPosition { find: String, value: String },

    #[error("pattern {find:?}: unknown scope {value:?}")]
    UnknownScope { find: String, value: String },

    #[error("pattern {find:?}: exact scope without a value")]
    MissingExactValue { find: String },

    #[error("character {0:?} is both a vowel and a consonant")]
    OverlappingClasses(char),
}

/// Which side of the match span a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The character just before the match start.
    Prefix,
    /// The character at the match end.
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Vowel,
    Consonant,
    Punctuation,
    Exact(Vec<char>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub position: Position,
    /// `None` never blocks the rule.
    pub scope: Option<Scope>,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matches: Vec<Condition>,
    pub replace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub find: Vec<char>,
    pub replace: String,
    /// Never `Some(empty)`: an empty rule list decodes to `None`.
    pub rules: Option<Vec<Rule>>,
}

impl Pattern {
    pub fn find_str(&self) -> String {
        self.find.iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    vowels: HashSet<char>,
    consonants: HashSet<char>,
    case_sensitive: HashSet<char>,
    patterns: Vec<Pattern>,
}

impl Grammar {
    /// Build a grammar from already-validated parts. Class characters are
    /// lowercased on the way in.
    pub fn new(
        vowels: &str,
        consonants: &str,
        case_sensitive: &str,
        patterns: Vec<Pattern>,
    ) -> Result<Self, GrammarError> {
        let vowels: HashSet<char> = vowels.chars().map(fold_case).collect();
        let consonants: HashSet<char> = consonants.chars().map(fold_case).collect();
        let case_sensitive = case_sensitive.chars().map(fold_case).collect();

        if let Some(&c) = vowels.intersection(&consonants).next() {
            return Err(GrammarError::OverlappingClasses(c));
        }

        Ok(Self {
            vowels,
            consonants,
            case_sensitive,
            patterns,
        })
    }

    /// Decode the embedded Avro Phonetic grammar.
    pub fn default_avro() -> Result<Self, GrammarError> {
        decode(DEFAULT_GRAMMAR_JSON.as_bytes())
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn vowel_count(&self) -> usize {
        self.vowels.len()
    }

    pub fn consonant_count(&self) -> usize {
        self.consonants.len()
    }

    pub fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(&fold_case(c))
    }

    pub fn is_consonant(&self, c: char) -> bool {
        self.consonants.contains(&fold_case(c))
    }

    /// Anything that is neither a vowel nor a consonant.
    pub fn is_punctuation(&self, c: char) -> bool {
        let c = fold_case(c);
        !self.vowels.contains(&c) && !self.consonants.contains(&c)
    }

    pub fn is_case_sensitive(&self, c: char) -> bool {
        self.case_sensitive.contains(&fold_case(c))
    }
}

/// Lowercase a single character. Characters whose lowercase form expands to
/// more than one code point are returned unchanged.
pub(crate) fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_folds_case() {
        let g = Grammar::new("aeiou", "bcdk", "o", Vec::new()).unwrap();
        assert!(g.is_vowel('a'));
        assert!(g.is_vowel('A'));
        assert!(g.is_consonant('K'));
        assert!(!g.is_consonant('a'));
        assert!(g.is_punctuation('.'));
        assert!(g.is_punctuation(' '));
        assert!(!g.is_punctuation('B'));
        assert!(g.is_case_sensitive('O'));
        assert!(g.is_case_sensitive('o'));
        assert!(!g.is_case_sensitive('a'));
    }

    #[test]
    fn test_class_sets_are_lowercased() {
        let g = Grammar::new("AEIOU", "BC", "", Vec::new()).unwrap();
        assert!(g.is_vowel('e'));
        assert!(g.is_consonant('c'));
        assert_eq!(g.vowel_count(), 5);
        assert_eq!(g.consonant_count(), 2);
    }

    #[test]
    fn test_overlapping_classes_rejected() {
        let err = Grammar::new("aeiou", "bcde", "", Vec::new()).unwrap_err();
        assert!(matches!(err, GrammarError::OverlappingClasses('e')));
    }

    #[test]
    fn test_fold_case_multi_char_lowercase_kept() {
        assert_eq!(fold_case('A'), 'a');
        assert_eq!(fold_case('ব'), 'ব');
        // U+0130 lowercases to "i\u{307}" (two code points).
        assert_eq!(fold_case('\u{130}'), '\u{130}');
    }

    #[test]
    fn test_default_grammar_decodes() {
        let g = Grammar::default_avro().unwrap();
        assert!(g.patterns().len() > 250);
        assert!(g.is_vowel('a'));
        assert!(g.is_consonant('z'));
        assert!(g.is_case_sensitive('S'));
        assert!(!g.is_case_sensitive('A'));
    }
}
