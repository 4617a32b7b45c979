//! Transliteration engine facade.
//!
//! `Transliterator` owns a decoded grammar and the trie compiled from it.
//! Both are immutable after construction, so one instance can serve any
//! number of concurrent callers. Only the Avro (forward) mode is
//! implemented; the other modes report `NotImplemented`.

mod explain;

pub use explain::{surface, ExplainSegment};

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug_span;

use crate::grammar::{
    decode, load_grammar, Grammar, GrammarError, GrammarSource, DEFAULT_GRAMMAR_JSON,
};
use crate::rules::{EvalOptions, RuleEvaluator};
use crate::scanner::{Scanner, Token};
use crate::settings::settings;
use crate::trie::PatternTrie;

static CUSTOM_GRAMMAR: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Transliterator> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Latin to Bangla using the phonetic grammar.
    #[default]
    Avro,
    /// Bangla to Latin.
    Orva,
    Banglish,
    Lishbang,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Avro, Mode::Orva, Mode::Banglish, Mode::Lishbang];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Avro => "avro",
            Mode::Orva => "orva",
            Mode::Banglish => "banglish",
            Mode::Lishbang => "lishbang",
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Mode::Avro)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TransliterationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avro" | "forward" => Ok(Mode::Avro),
            "orva" | "reverse" => Ok(Mode::Orva),
            "banglish" => Ok(Mode::Banglish),
            "lishbang" => Ok(Mode::Lishbang),
            _ => Err(TransliterationError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransliterationError {
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),
    #[error("{0} mode is not implemented")]
    NotImplemented(Mode),
    #[error("grammar load error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("transliterator already initialized")]
    AlreadyInitialized,
}

#[derive(Debug)]
pub struct Transliterator {
    grammar: Grammar,
    trie: PatternTrie,
    options: EvalOptions,
}

impl Transliterator {
    /// Compile `grammar` using the rule options from global settings.
    pub fn new(grammar: Grammar) -> Self {
        Self::with_options(grammar, settings().eval_options())
    }

    pub fn with_options(grammar: Grammar, options: EvalOptions) -> Self {
        let trie = PatternTrie::build(grammar.patterns());
        Self {
            grammar,
            trie,
            options,
        }
    }

    pub fn from_source(source: &dyn GrammarSource) -> Result<Self, TransliterationError> {
        let _span = debug_span!("load_grammar", source = %source.describe()).entered();
        Ok(Self::new(load_grammar(source)?))
    }

    /// Set a custom grammar document before first `global()` call.
    /// Fails with `AlreadyInitialized` once the singleton has been built.
    pub fn init_custom(json: String) -> Result<(), TransliterationError> {
        // Validate eagerly
        decode(json.as_bytes())?;
        if INSTANCE.get().is_some() {
            return Err(TransliterationError::AlreadyInitialized);
        }
        CUSTOM_GRAMMAR
            .set(json)
            .map_err(|_| TransliterationError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Transliterator {
        INSTANCE.get_or_init(|| {
            let json = CUSTOM_GRAMMAR
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_GRAMMAR_JSON);
            let grammar = decode(json.as_bytes()).expect("grammar JSON must be valid");
            Transliterator::new(grammar)
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn trie(&self) -> &PatternTrie {
        &self.trie
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    pub fn transliterate(&self, text: &str, mode: Mode) -> Result<String, TransliterationError> {
        match mode {
            Mode::Avro => Ok(self.avro(text)),
            Mode::Orva | Mode::Banglish | Mode::Lishbang => {
                Err(TransliterationError::NotImplemented(mode))
            }
        }
    }

    /// Like `transliterate`, with the mode given by name.
    pub fn transliterate_str(
        &self,
        text: &str,
        mode: &str,
    ) -> Result<String, TransliterationError> {
        self.transliterate(text, mode.parse()?)
    }

    /// Forward conversion. Never fails: unmatched characters pass through.
    pub fn avro(&self, text: &str) -> String {
        let _span = debug_span!("avro", bytes = text.len()).entered();

        let chars = self.normalize(text);
        let evaluator = self.evaluator();
        let mut out = String::with_capacity(chars.len() * 3);

        for token in Scanner::new(&self.trie, &chars) {
            match token {
                Token::Literal { ch, .. } => out.push(ch),
                Token::Match {
                    pattern,
                    start,
                    end,
                } => {
                    let p = &self.grammar.patterns()[pattern];
                    out.push_str(evaluator.resolve(p, &chars, start, end).text);
                }
            }
        }
        out
    }

    /// Lowercase everything except characters the grammar marks as
    /// case-sensitive, which are kept exactly as typed.
    pub fn normalize(&self, text: &str) -> Vec<char> {
        let mut chars = Vec::with_capacity(text.len());
        for c in text.chars() {
            if self.grammar.is_case_sensitive(c) {
                chars.push(c);
            } else {
                chars.extend(c.to_lowercase());
            }
        }
        chars
    }

    fn evaluator(&self) -> RuleEvaluator<'_> {
        RuleEvaluator::new(&self.grammar, self.options)
    }
}
