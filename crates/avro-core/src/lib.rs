//! Rule-driven phonetic transliteration from Latin script to Bangla.
//!
//! A JSON grammar (character classes plus contextual find/replace patterns)
//! is compiled into a prefix trie; input is scanned leftmost-longest and each
//! match is resolved against its neighbours by the rule evaluator.
//!
//! ```
//! use avro_core::engine::{Mode, Transliterator};
//!
//! let t = Transliterator::global();
//! assert_eq!(t.transliterate("amar sOnar bangla", Mode::Avro).unwrap(), "আমার সোনার বাংলা");
//! ```

pub mod engine;
pub mod grammar;
pub mod rules;
pub mod scanner;
pub mod settings;
pub mod trie;

pub use engine::{Mode, TransliterationError, Transliterator};
