use serde::Serialize;

use crate::scanner::{Scanner, Token};

use super::Transliterator;

/// One scan step, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainSegment {
    /// Character offsets into the normalized input.
    pub start: usize,
    pub end: usize,
    pub source: String,
    pub output: String,
    /// The pattern's `find`, absent for literal passthrough.
    pub pattern: Option<String>,
    /// Index of the rule that fired within the pattern.
    pub rule: Option<usize>,
}

impl Transliterator {
    /// Run the forward scan and record every step. Concatenating `output`
    /// over all segments yields `avro(text)`.
    pub fn explain(&self, text: &str) -> Vec<ExplainSegment> {
        let chars = self.normalize(text);
        let evaluator = self.evaluator();

        Scanner::new(&self.trie, &chars)
            .map(|token| match token {
                Token::Literal { pos, ch } => ExplainSegment {
                    start: pos,
                    end: pos + 1,
                    source: ch.to_string(),
                    output: ch.to_string(),
                    pattern: None,
                    rule: None,
                },
                Token::Match {
                    pattern,
                    start,
                    end,
                } => {
                    let p = &self.grammar.patterns()[pattern];
                    let res = evaluator.resolve(p, &chars, start, end);
                    ExplainSegment {
                        start,
                        end,
                        source: chars[start..end].iter().collect(),
                        output: res.text.to_string(),
                        pattern: Some(p.find_str()),
                        rule: res.rule,
                    }
                }
            })
            .collect()
    }
}

/// Join segment outputs back into the converted string.
pub fn surface(segments: &[ExplainSegment]) -> String {
    segments.iter().map(|s| s.output.as_str()).collect()
}
