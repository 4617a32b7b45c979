//! Fixture-corpus accuracy runs.
//!
//! The corpus is TOML:
//!
//! ```toml
//! [[cases]]
//! input = "ami"
//! expected = "আমি"
//! category = "word"   # optional
//! skip = false        # optional
//! ```

use std::fs;

use serde::Deserialize;

use avro_core::Transliterator;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
    pub cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
pub struct Case {
    pub input: String,
    pub expected: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Failure {
    pub input: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Default)]
pub struct Report {
    pub passed: usize,
    pub skipped: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.passed + self.skipped + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn parse_corpus(content: &str) -> Result<Corpus, CorpusError> {
    Ok(toml::from_str(content)?)
}

pub fn load_corpus(path: &str) -> Result<Corpus, CorpusError> {
    parse_corpus(&fs::read_to_string(path)?)
}

/// Convert every case and compare against its expectation.
pub fn run(engine: &Transliterator, corpus: &Corpus, category: Option<&str>) -> Report {
    let mut report = Report::default();
    for case in &corpus.cases {
        if let Some(filter) = category {
            if case.category.as_deref() != Some(filter) {
                continue;
            }
        }
        if case.skip {
            report.skipped += 1;
            continue;
        }
        let actual = engine.avro(&case.input);
        if actual == case.expected {
            report.passed += 1;
        } else {
            report.failures.push(Failure {
                input: case.input.clone(),
                expected: case.expected.clone(),
                actual,
            });
        }
    }
    report
}
