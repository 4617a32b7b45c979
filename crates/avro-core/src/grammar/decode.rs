use serde::Deserialize;
use tracing::debug_span;

use super::{Condition, Grammar, GrammarError, Pattern, Position, Rule, Scope};

#[derive(Deserialize)]
struct GrammarDoc {
    vowel: String,
    consonant: String,
    casesensitive: String,
    patterns: Vec<PatternDoc>,
}

#[derive(Deserialize)]
struct PatternDoc {
    find: String,
    replace: String,
    #[serde(default)]
    rules: Option<Vec<RuleDoc>>,
}

#[derive(Deserialize)]
struct RuleDoc {
    matches: Vec<MatchDoc>,
    replace: String,
}

#[derive(Deserialize)]
struct MatchDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

/// Decode a JSON grammar document.
pub fn decode(bytes: &[u8]) -> Result<Grammar, GrammarError> {
    let _span = debug_span!("grammar_decode", bytes = bytes.len()).entered();

    let doc: GrammarDoc = serde_json::from_slice(bytes)?;
    let patterns = doc
        .patterns
        .into_iter()
        .enumerate()
        .map(|(i, p)| convert_pattern(i, p))
        .collect::<Result<Vec<_>, _>>()?;

    Grammar::new(&doc.vowel, &doc.consonant, &doc.casesensitive, patterns)
}

fn convert_pattern(index: usize, doc: PatternDoc) -> Result<Pattern, GrammarError> {
    if doc.find.is_empty() {
        return Err(GrammarError::EmptyFind(index));
    }

    let rules = match doc.rules {
        Some(rules) if !rules.is_empty() => Some(
            rules
                .into_iter()
                .map(|r| convert_rule(&doc.find, r))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        _ => None,
    };

    Ok(Pattern {
        find: doc.find.chars().collect(),
        replace: doc.replace,
        rules,
    })
}

fn convert_rule(find: &str, doc: RuleDoc) -> Result<Rule, GrammarError> {
    let matches = doc
        .matches
        .into_iter()
        .map(|m| convert_match(find, m))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Rule {
        matches,
        replace: doc.replace,
    })
}

fn convert_match(find: &str, doc: MatchDoc) -> Result<Condition, GrammarError> {
    let position = match doc.kind.as_str() {
        "prefix" => Position::Prefix,
        "suffix" => Position::Suffix,
        other => {
            return Err(GrammarError::UnknownPosition {
                find: find.to_string(),
                value: other.to_string(),
            })
        }
    };

    let Some(raw) = doc.scope else {
        return Ok(Condition {
            position,
            scope: None,
            negated: false,
        });
    };

    let (negated, name) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw.as_str()),
    };

    let scope = match name {
        "vowel" => Scope::Vowel,
        "consonant" => Scope::Consonant,
        "punctuation" => Scope::Punctuation,
        "exact" => match doc.value {
            Some(v) => Scope::Exact(v.chars().collect()),
            None => {
                return Err(GrammarError::MissingExactValue {
                    find: find.to_string(),
                })
            }
        },
        _ => {
            return Err(GrammarError::UnknownScope {
                find: find.to_string(),
                value: raw.clone(),
            })
        }
    };

    Ok(Condition {
        position,
        scope: Some(scope),
        negated,
    })
}
