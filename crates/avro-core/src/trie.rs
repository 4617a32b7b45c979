//! Prefix trie over pattern `find` sequences.
//!
//! Nodes live in a flat arena addressed by `u32` index (root = 0). Each node
//! keeps its children as a `char`-sorted vector for binary search. The trie
//! is built once and never mutated afterwards, so a shared reference can be
//! used from any number of threads.

use tracing::debug_span;

use crate::grammar::Pattern;

const ROOT: u32 = 0;

#[derive(Debug, PartialEq)]
pub enum TrieLookup {
    None,
    Prefix,
    /// Index into the pattern list the trie was built from.
    Exact(usize),
    ExactAndPrefix(usize),
}

#[derive(Debug, Default)]
struct Node {
    children: Vec<(char, u32)>,
    terminal: Option<u32>,
}

#[derive(Debug)]
pub struct PatternTrie {
    nodes: Vec<Node>,
}

impl PatternTrie {
    /// Insert patterns longest-first. The sort is stable, so for two patterns
    /// sharing a `find` the later one in the list owns the terminal.
    pub fn build(patterns: &[Pattern]) -> Self {
        let _span = debug_span!("trie_build", patterns = patterns.len()).entered();

        let mut order: Vec<usize> = (0..patterns.len()).collect();
        order.sort_by(|&a, &b| patterns[b].find.len().cmp(&patterns[a].find.len()));

        let mut trie = Self {
            nodes: vec![Node::default()],
        };
        for idx in order {
            trie.insert(&patterns[idx].find, idx as u32);
        }
        trie
    }

    fn insert(&mut self, find: &[char], pattern: u32) {
        let mut node = ROOT;
        for &c in find {
            node = match self.nodes[node as usize]
                .children
                .binary_search_by_key(&c, |&(k, _)| k)
            {
                Ok(pos) => self.nodes[node as usize].children[pos].1,
                Err(pos) => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(Node::default());
                    self.nodes[node as usize].children.insert(pos, (c, next));
                    next
                }
            };
        }
        self.nodes[node as usize].terminal = Some(pattern);
    }

    fn root(&self) -> u32 {
        ROOT
    }

    /// Follow the edge labelled `c`, if any.
    fn step(&self, node: u32, c: char) -> Option<u32> {
        let children = &self.nodes[node as usize].children;
        children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|pos| children[pos].1)
    }

    fn terminal(&self, node: u32) -> Option<usize> {
        self.nodes[node as usize].terminal.map(|p| p as usize)
    }

    /// Walk from `chars[start]` as far as the input allows and return the
    /// deepest terminal seen, as `(pattern, length)`.
    pub fn longest_match(&self, chars: &[char], start: usize) -> Option<(usize, usize)> {
        let mut node = self.root();
        let mut best = None;
        for (offset, &c) in chars.get(start..)?.iter().enumerate() {
            let Some(next) = self.step(node, c) else {
                break;
            };
            if let Some(pattern) = self.terminal(next) {
                best = Some((pattern, offset + 1));
            }
            node = next;
        }
        best
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Classify a whole sequence against the trie.
    pub fn lookup(&self, seq: &str) -> TrieLookup {
        let mut node = self.root();
        for c in seq.chars() {
            match self.step(node, c) {
                Some(next) => node = next,
                None => return TrieLookup::None,
            }
        }
        if node == ROOT {
            return TrieLookup::None;
        }
        let has_children = !self.nodes[node as usize].children.is_empty();
        match (self.terminal(node), has_children) {
            (None, false) => TrieLookup::None,
            (None, true) => TrieLookup::Prefix,
            (Some(p), false) => TrieLookup::Exact(p),
            (Some(p), true) => TrieLookup::ExactAndPrefix(p),
        }
    }
}
