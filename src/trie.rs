//! Prefix trie over the codebook entries
//!
//! The trie lives in a fixed-size arena so it can be built by a `const fn`
//! and stored in a `static` without any allocation. Children of a node are
//! kept as a singly-linked sibling list; index 0 is the root, which can never
//! be anyone's child or sibling, so 0 doubles as the "no link" value.

use crate::codebook::{CodebookError, MAX_ENTRIES, MAX_ENTRY_LEN};

/// Upper bound on nodes: the root plus one node per byte of every entry
pub(crate) const MAX_NODES: usize = 1 + MAX_ENTRIES * MAX_ENTRY_LEN;

const NO_LINK: u16 = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    byte: u8,
    code: Option<u8>,
    first_child: u16,
    next_sibling: u16,
}
impl Node {
    const EMPTY: Self = Self {
        byte: 0,
        code: None,
        first_child: NO_LINK,
        next_sibling: NO_LINK,
    };
}

/// A codebook hit: the entry's code and how many input bytes it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub code: u8,
    pub len: usize,
}

/// Longest-prefix search structure built from a codebook
#[derive(Debug, Clone)]
pub struct MatchIndex {
    nodes: [Node; MAX_NODES],
    used: usize,
}

impl MatchIndex {
    /// Build the trie, rejecting empty, overlong and duplicate entries
    ///
    /// The caller has already checked `entries.len() <= MAX_ENTRIES`.
    pub(crate) const fn build(entries: &[&[u8]]) -> Result<Self, CodebookError> {
        let mut index = Self {
            nodes: [Node::EMPTY; MAX_NODES],
            used: 1,
        };

        let mut i = 0;
        while i < entries.len() {
            let entry = entries[i];
            if entry.is_empty() || entry.len() > MAX_ENTRY_LEN {
                return Err(CodebookError::InvalidEntryLength {
                    index: i,
                    len: entry.len(),
                });
            }

            let mut node = 0;
            let mut j = 0;
            while j < entry.len() {
                let b = entry[j];
                let mut child = index.nodes[node].first_child as usize;
                while child != NO_LINK as usize && index.nodes[child].byte != b {
                    child = index.nodes[child].next_sibling as usize;
                }
                if child == NO_LINK as usize {
                    child = index.used;
                    index.used += 1;
                    index.nodes[child] = Node {
                        byte: b,
                        code: None,
                        first_child: NO_LINK,
                        next_sibling: index.nodes[node].first_child,
                    };
                    index.nodes[node].first_child = child as u16;
                }
                node = child;
                j += 1;
            }

            if let Some(first) = index.nodes[node].code {
                return Err(CodebookError::DuplicateEntry {
                    index: i,
                    first: first as usize,
                });
            }
            index.nodes[node].code = Some(i as u8);
            i += 1;
        }

        Ok(index)
    }

    fn child(&self, node: usize, b: u8) -> Option<usize> {
        let mut child = self.nodes[node].first_child;
        while child != NO_LINK {
            let n = &self.nodes[child as usize];
            if n.byte == b {
                return Some(child as usize);
            }
            child = n.next_sibling;
        }
        None
    }

    /// Find the longest entry that is a prefix of `input`
    ///
    /// At most [MAX_ENTRY_LEN] bytes of `input` are ever examined.
    pub fn longest_match(&self, input: &[u8]) -> Option<Match> {
        let mut node = 0;
        let mut best = None;
        for (i, &b) in input.iter().take(MAX_ENTRY_LEN).enumerate() {
            node = match self.child(node, b) {
                Some(child) => child,
                None => break,
            };
            if let Some(code) = self.nodes[node].code {
                best = Some(Match { code, len: i + 1 });
            }
        }
        best
    }

    /// Number of trie nodes in use, including the root
    pub fn node_count(&self) -> usize {
        self.used
    }
}
