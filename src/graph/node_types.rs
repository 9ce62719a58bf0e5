//! Multi-label node type parsing
//!
//! Turns the optional raw type value of a node row into a sorted, duplicate
//! free set of node-type IDs. An absent value gives the empty set. Any
//! explicit string is a real type, including words such as `"None"` or
//! `"NaN"` that other tools use as missing-value markers.

use super::types::NodeTypeId;
use super::vocab::Vocabulary;

/// Parses node type strings and interns the resulting labels
#[derive(Debug, Default)]
pub struct NodeTypeAssigner {
    vocabulary: Vocabulary<NodeTypeId>,
    separator: Option<String>,
    trim: bool,
}

impl NodeTypeAssigner {
    /// Without a separator the whole string is one type
    pub fn new(separator: Option<String>) -> Self {
        NodeTypeAssigner {
            vocabulary: Vocabulary::new(),
            separator: separator.filter(|sep| !sep.is_empty()),
            trim: false,
        }
    }

    /// Trim whitespace around each label after splitting
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Resolve a raw type value to its type-ID set.
    ///
    /// Empty labels produced by splitting (`"a||b"`, a trailing separator)
    /// are skipped.
    pub fn assign(&mut self, raw: Option<&str>) -> Vec<NodeTypeId> {
        let Some(raw) = raw else {
            return Vec::new();
        };

        let vocabulary = &mut self.vocabulary;
        let trim = self.trim;
        let mut intern = |label: &str| {
            let label = if trim { label.trim() } else { label };
            if label.is_empty() {
                None
            } else {
                Some(vocabulary.insert(label))
            }
        };

        let mut ids: Vec<NodeTypeId> = match self.separator.as_deref() {
            Some(sep) => raw.split(sep).filter_map(&mut intern).collect(),
            None => intern(raw).into_iter().collect(),
        };

        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn vocabulary(&self) -> &Vocabulary<NodeTypeId> {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary<NodeTypeId> {
        self.vocabulary
    }
}
