//! Leftmost, longest-match scanning over a normalized character array.

use crate::trie::PatternTrie;

/// One scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// No pattern starts here; the character is emitted as-is.
    Literal { pos: usize, ch: char },
    /// `pattern` matched `chars[start..end]`.
    Match {
        pattern: usize,
        start: usize,
        end: usize,
    },
}

impl Token {
    /// Index one past the last consumed character.
    pub fn end(&self) -> usize {
        match *self {
            Token::Literal { pos, .. } => pos + 1,
            Token::Match { end, .. } => end,
        }
    }
}

/// Iterator of tokens covering `chars` without gaps or overlaps.
pub struct Scanner<'a> {
    trie: &'a PatternTrie,
    chars: &'a [char],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(trie: &'a PatternTrie, chars: &'a [char]) -> Self {
        Self {
            trie,
            chars,
            pos: 0,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let start = self.pos;
        let token = match self.trie.longest_match(self.chars, start) {
            Some((pattern, len)) => Token::Match {
                pattern,
                start,
                end: start + len,
            },
            None => Token::Literal {
                pos: start,
                ch: self.chars[start],
            },
        };
        self.pos = token.end();
        Some(token)
    }
}
