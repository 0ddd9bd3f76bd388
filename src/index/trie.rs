use crate::core::types::{fold_case, DocId, RowId};
use crate::index::posting::Postings;

type NodeId = usize;

const ROOT: NodeId = 0;

/// Arena node. Children keep insertion order so enumeration is
/// deterministic for a fixed insertion sequence.
#[derive(Debug, Default)]
struct TrieNode {
    children: Vec<(char, NodeId)>,
    /// Present only on terminal nodes
    postings: Option<Postings>,
}

impl TrieNode {
    fn child(&self, ch: char) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, id)| *id)
    }

    fn is_terminal(&self) -> bool {
        self.postings.is_some()
    }
}

/// Character trie mapping a case-folded token to its postings.
///
/// Nodes live in one arena addressed by index; a node is never removed,
/// and dropping the index releases the whole structure at once.
#[derive(Debug)]
pub struct TrieIndex {
    nodes: Vec<TrieNode>,
    term_count: usize,
}

impl Default for TrieIndex {
    fn default() -> Self {
        TrieIndex::new()
    }
}

impl TrieIndex {
    pub fn new() -> Self {
        TrieIndex {
            nodes: vec![TrieNode::default()],
            term_count: 0,
        }
    }

    /// Index `token` at (doc, row). The empty token is never indexed,
    /// so the root stays non-terminal.
    pub fn insert(&mut self, token: &str, doc: &DocId, row: RowId) -> bool {
        let token = fold_case(token);
        if token.is_empty() {
            return false;
        }

        let mut current = ROOT;
        for ch in token.chars() {
            current = match self.nodes[current].child(ch) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.push((ch, next));
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.postings.is_none() {
            node.postings = Some(Postings::new());
            self.term_count += 1;
        }
        match node.postings.as_mut() {
            Some(postings) => postings.add(doc, row),
            None => false,
        }
    }

    fn walk(&self, folded: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for ch in folded.chars() {
            current = self.nodes[current].child(ch)?;
        }
        Some(current)
    }

    /// Borrowing exact-term lookup
    pub fn get(&self, token: &str) -> Option<&Postings> {
        let node = self.walk(&fold_case(token))?;
        self.nodes[node].postings.as_ref()
    }

    /// Exact-term lookup. A token that is only a prefix of indexed
    /// terms is a miss, and a miss is an empty result.
    pub fn lookup(&self, token: &str) -> Postings {
        self.get(token).cloned().unwrap_or_default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Every indexed term starting with `prefix`, depth-first in
    /// child-insertion order. The prefix itself is included when it is a term.
    pub fn prefix(&self, prefix: &str) -> Vec<String> {
        let folded = fold_case(prefix);
        let mut terms = Vec::new();

        let start = match self.walk(&folded) {
            Some(node) => node,
            None => return terms,
        };

        // Explicit stack keeps deep tokens off the call stack
        let mut stack: Vec<(NodeId, String)> = vec![(start, folded)];
        while let Some((node_id, word)) = stack.pop() {
            let node = &self.nodes[node_id];
            if node.is_terminal() {
                terms.push(word.clone());
            }
            for (ch, child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(*ch);
                stack.push((*child, next));
            }
        }

        terms
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.term_count
    }

    pub fn is_empty(&self) -> bool {
        self.term_count == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
