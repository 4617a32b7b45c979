//! Contextual rule evaluation for a matched pattern.
//!
//! A rule fires when every one of its conditions holds; the first firing rule
//! supplies the replacement, otherwise the pattern's default is used.
//! String boundaries count as punctuation and never as a vowel or consonant.

use serde::Deserialize;
use tracing::debug;

use crate::grammar::{Condition, Grammar, Pattern, Position, Rule, Scope};

/// How an `exact` condition whose window crosses a string boundary is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExactOutOfRange {
    /// The comparison is false, so a negated condition passes.
    #[default]
    Negatable,
    /// The condition fails whether or not it is negated.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    pub exact_out_of_range: ExactOutOfRange,
}

/// The replacement chosen for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'p> {
    pub text: &'p str,
    /// Index of the rule that fired; `None` means the default replacement.
    pub rule: Option<usize>,
}

pub struct RuleEvaluator<'g> {
    grammar: &'g Grammar,
    options: EvalOptions,
}

impl<'g> RuleEvaluator<'g> {
    pub fn new(grammar: &'g Grammar, options: EvalOptions) -> Self {
        Self { grammar, options }
    }

    /// Pick the replacement for `pattern` matched at `chars[start..end]`.
    pub fn resolve<'p>(
        &self,
        pattern: &'p Pattern,
        chars: &[char],
        start: usize,
        end: usize,
    ) -> Resolution<'p> {
        let Some(rules) = &pattern.rules else {
            return Resolution {
                text: &pattern.replace,
                rule: None,
            };
        };

        for (i, rule) in rules.iter().enumerate() {
            if self.rule_holds(rule, chars, start, end) {
                debug!(find = %pattern.find_str(), rule = i, start, "rule fired");
                return Resolution {
                    text: &rule.replace,
                    rule: Some(i),
                };
            }
        }

        Resolution {
            text: &pattern.replace,
            rule: None,
        }
    }

    fn rule_holds(&self, rule: &Rule, chars: &[char], start: usize, end: usize) -> bool {
        rule.matches
            .iter()
            .all(|cond| self.condition_holds(cond, chars, start, end))
    }

    fn condition_holds(&self, cond: &Condition, chars: &[char], start: usize, end: usize) -> bool {
        let Some(scope) = &cond.scope else {
            return true;
        };

        let neighbour = match cond.position {
            Position::Prefix => start.checked_sub(1).and_then(|i| chars.get(i)),
            Position::Suffix => chars.get(end),
        };

        let raw = match scope {
            Scope::Punctuation => neighbour.map_or(true, |&c| self.grammar.is_punctuation(c)),
            Scope::Vowel => neighbour.is_some_and(|&c| self.grammar.is_vowel(c)),
            Scope::Consonant => neighbour.is_some_and(|&c| self.grammar.is_consonant(c)),
            Scope::Exact(value) => match exact_window(cond.position, value.len(), chars, start, end) {
                Some(window) => window == value.as_slice(),
                None => {
                    return match self.options.exact_out_of_range {
                        ExactOutOfRange::Negatable => cond.negated,
                        ExactOutOfRange::Strict => false,
                    }
                }
            },
        };

        raw != cond.negated
    }
}

/// The `len` characters adjacent to the match on the given side, or `None`
/// if that window runs past either end of the input.
fn exact_window(
    position: Position,
    len: usize,
    chars: &[char],
    start: usize,
    end: usize,
) -> Option<&[char]> {
    match position {
        Position::Prefix => {
            let from = start.checked_sub(len)?;
            chars.get(from..start)
        }
        Position::Suffix => chars.get(end..end.checked_add(len)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Grammar::new("aeiou", "bcdfghjklmnpqrstvwxyz", "", Vec::new()).unwrap()
    }

    fn cond(position: Position, scope: Option<Scope>, negated: bool) -> Condition {
        Condition {
            position,
            scope,
            negated,
        }
    }

    fn pattern(find: &str, replace: &str, rules: Vec<(Vec<Condition>, &str)>) -> Pattern {
        Pattern {
            find: find.chars().collect(),
            replace: replace.to_string(),
            rules: Some(
                rules
                    .into_iter()
                    .map(|(matches, r)| Rule {
                        matches,
                        replace: r.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_no_rules_returns_default() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let p = Pattern {
            find: vec!['k'],
            replace: "ক".into(),
            rules: None,
        };
        let r = ev.resolve(&p, &chars("k"), 0, 1);
        assert_eq!(r, Resolution { text: "ক", rule: None });
    }

    #[test]
    fn test_first_satisfied_rule_wins() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let p = pattern(
            "a",
            "default",
            vec![
                (vec![cond(Position::Prefix, Some(Scope::Punctuation), false)], "first"),
                (vec![cond(Position::Suffix, Some(Scope::Punctuation), false)], "second"),
            ],
        );
        let r = ev.resolve(&p, &chars("a"), 0, 1);
        assert_eq!(r.text, "first");
        assert_eq!(r.rule, Some(0));
    }

    #[test]
    fn test_default_when_no_rule_fires() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let p = pattern(
            "a",
            "default",
            vec![(vec![cond(Position::Prefix, Some(Scope::Vowel), false)], "x")],
        );
        let r = ev.resolve(&p, &chars("ka"), 1, 2);
        assert_eq!(r, Resolution { text: "default", rule: None });
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let p = pattern(
            "a",
            "default",
            vec![(
                vec![
                    cond(Position::Prefix, Some(Scope::Consonant), false),
                    cond(Position::Suffix, Some(Scope::Vowel), false),
                ],
                "both",
            )],
        );
        assert_eq!(ev.resolve(&p, &chars("kai"), 1, 2).text, "both");
        assert_eq!(ev.resolve(&p, &chars("kak"), 1, 2).text, "default");
        assert_eq!(ev.resolve(&p, &chars("iai"), 1, 2).text, "default");
    }

    #[test]
    fn test_boundaries_are_punctuation_not_letters() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let input = chars("k");
        for (position, scope, expected) in [
            (Position::Prefix, Scope::Punctuation, true),
            (Position::Suffix, Scope::Punctuation, true),
            (Position::Prefix, Scope::Vowel, false),
            (Position::Suffix, Scope::Vowel, false),
            (Position::Prefix, Scope::Consonant, false),
            (Position::Suffix, Scope::Consonant, false),
        ] {
            let c = cond(position, Some(scope.clone()), false);
            assert_eq!(
                ev.condition_holds(&c, &input, 0, 1),
                expected,
                "{position:?} {scope:?}"
            );
            let negated = cond(position, Some(scope.clone()), true);
            assert_eq!(ev.condition_holds(&negated, &input, 0, 1), !expected);
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let c = cond(Position::Prefix, Some(Scope::Consonant), false);
        assert!(ev.condition_holds(&c, &chars("Sa"), 1, 2));
        let v = cond(Position::Suffix, Some(Scope::Vowel), false);
        assert!(ev.condition_holds(&v, &chars("kO"), 0, 1));
    }

    #[test]
    fn test_exact_prefix_and_suffix_windows() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let input = chars("rka`");
        let prefix_r = cond(Position::Prefix, Some(Scope::Exact(vec!['r'])), false);
        let prefix_rk = cond(Position::Prefix, Some(Scope::Exact(vec!['r', 'k'])), false);
        let suffix_tick = cond(Position::Suffix, Some(Scope::Exact(vec!['`'])), false);
        // match is the "a" at index 2
        assert!(!ev.condition_holds(&prefix_r, &input, 2, 3));
        assert!(ev.condition_holds(&prefix_rk, &input, 2, 3));
        assert!(ev.condition_holds(&suffix_tick, &input, 2, 3));
        // match is the "k" at index 1
        assert!(ev.condition_holds(&prefix_r, &input, 1, 2));
    }

    #[test]
    fn test_exact_out_of_range_negatable() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let input = chars("a");
        let plain = cond(Position::Suffix, Some(Scope::Exact(vec!['`'])), false);
        let negated = cond(Position::Suffix, Some(Scope::Exact(vec!['`'])), true);
        let negated_prefix = cond(Position::Prefix, Some(Scope::Exact(vec!['a'])), true);
        assert!(!ev.condition_holds(&plain, &input, 0, 1));
        assert!(ev.condition_holds(&negated, &input, 0, 1));
        assert!(ev.condition_holds(&negated_prefix, &input, 0, 1));
    }

    #[test]
    fn test_exact_out_of_range_strict() {
        let g = grammar();
        let ev = RuleEvaluator::new(
            &g,
            EvalOptions {
                exact_out_of_range: ExactOutOfRange::Strict,
            },
        );
        let input = chars("ka");
        let plain = cond(Position::Suffix, Some(Scope::Exact(vec!['`'])), false);
        let negated = cond(Position::Suffix, Some(Scope::Exact(vec!['`'])), true);
        let long_prefix = cond(Position::Prefix, Some(Scope::Exact(vec!['x', 'k'])), true);
        assert!(!ev.condition_holds(&plain, &input, 1, 2));
        assert!(!ev.condition_holds(&negated, &input, 1, 2));
        assert!(!ev.condition_holds(&long_prefix, &input, 1, 2));
        // In-range negation is unaffected by the policy.
        let in_range = cond(Position::Prefix, Some(Scope::Exact(vec!['r'])), true);
        assert!(ev.condition_holds(&in_range, &input, 1, 2));
    }

    #[test]
    fn test_absent_scope_always_holds() {
        let g = grammar();
        let ev = RuleEvaluator::new(&g, EvalOptions::default());
        let c = cond(Position::Suffix, None, false);
        assert!(ev.condition_holds(&c, &chars("a"), 0, 1));
        assert!(ev.condition_holds(&c, &chars("ab"), 0, 1));
    }
}
