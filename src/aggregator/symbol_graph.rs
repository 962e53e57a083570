//! Call-path graph built from allocation records.
//!
//! Every node stands for one call path: the symbol names from the first
//! frame of a backtrace down to some depth. Two records share a node at
//! depth k exactly when their first k+1 symbols are equal, so a node's
//! totals cover every allocation made through that path.
//!
//! Nodes are interned as a trie keyed by (parent node, symbol name). This
//! gives the same identity as comparing whole paths without flattening
//! names into one string.

use crate::parser::schema::AllocationRecord;
use log::debug;
use std::collections::{HashMap, HashSet};

/// One aggregated call-path node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNode {
    /// Position in first-seen order, used as the graph node id
    pub index: usize,

    /// Symbol of the last frame on the path
    pub name: String,

    /// Symbols from the first frame down to this node
    pub path: Vec<String>,

    /// Allocation count summed over all records through this path
    pub total_count: u64,

    /// Bytes summed over all records through this path
    pub total_size: u64,
}

impl SymbolNode {
    /// Frame position of this node (0 for first frames)
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Concatenated path symbols, e.g. "mainfoo"
    pub fn path_key(&self) -> String {
        self.path.concat()
    }
}

/// Caller to callee adjacency between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Registry of call-path nodes and the edges between them
#[derive(Debug, Default, Clone)]
pub struct SymbolGraph {
    nodes: Vec<SymbolNode>,
    children: HashMap<(Option<usize>, String), usize>,
    edges: Vec<Edge>,
    edge_set: HashSet<Edge>,
    record_count: usize,
}

impl SymbolGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a full set of records
    ///
    /// **Public** - main entry point for aggregation
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AllocationRecord>,
    {
        let mut graph = Self::new();
        graph.ingest(records);
        graph
    }

    /// Add a stream of records, in order
    pub fn ingest<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = AllocationRecord>,
    {
        for record in records {
            self.add_record(&record);
        }

        debug!(
            "Aggregated {} records into {} nodes and {} edges",
            self.record_count,
            self.nodes.len(),
            self.edges.len()
        );
    }

    /// Fold one record into the graph
    ///
    /// Walks the frames in order, creating or updating the node for each
    /// prefix and linking consecutive frames. A record without frames only
    /// bumps the record counter.
    pub fn add_record(&mut self, record: &AllocationRecord) {
        self.record_count += 1;

        let mut previous: Option<usize> = None;
        for frame in &record.frames {
            let index = self.intern(previous, &frame.symbol);

            let node = &mut self.nodes[index];
            node.total_count = node.total_count.saturating_add(record.count);
            node.total_size = node.total_size.saturating_add(record.size);

            if let Some(parent) = previous {
                self.insert_edge(Edge::new(parent, index));
            }
            previous = Some(index);
        }
    }

    /// Find or create the child of `parent` named `symbol`
    ///
    /// **Private** - new nodes start with zero totals
    fn intern(&mut self, parent: Option<usize>, symbol: &str) -> usize {
        let key = (parent, symbol.to_string());
        if let Some(&index) = self.children.get(&key) {
            return index;
        }

        let mut path = parent
            .map(|p| self.nodes[p].path.clone())
            .unwrap_or_default();
        path.push(symbol.to_string());

        let index = self.nodes.len();
        self.nodes.push(SymbolNode {
            index,
            name: symbol.to_string(),
            path,
            total_count: 0,
            total_size: 0,
        });
        self.children.insert(key, index);
        index
    }

    fn insert_edge(&mut self, edge: Edge) {
        if self.edge_set.insert(edge) {
            self.edges.push(edge);
        }
    }

    /// Nodes in index order
    pub fn nodes(&self) -> &[SymbolNode] {
        &self.nodes
    }

    /// Deduplicated edges in first-seen order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&SymbolNode> {
        self.nodes.get(index)
    }

    /// Look up a node by its full symbol path
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&SymbolNode> {
        let mut current: Option<usize> = None;
        for symbol in path {
            let key = (current, symbol.as_ref().to_string());
            current = Some(*self.children.get(&key)?);
        }
        current.and_then(|index| self.nodes.get(index))
    }

    /// Look up a node by its concatenated path key
    ///
    /// Different paths can concatenate to the same key (["ma", "in"] and
    /// ["main"]); the first node in index order wins.
    pub fn find_by_path_key(&self, key: &str) -> Option<&SymbolNode> {
        self.nodes.iter().find(|node| node.path_key() == key)
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edge_set.contains(&Edge::new(from, to))
    }

    /// Nodes for first frames, in index order
    pub fn roots(&self) -> impl Iterator<Item = &SymbolNode> {
        self.nodes.iter().filter(|node| node.path.len() == 1)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Records folded in so far, including frameless ones
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clears all nodes, edges and counters.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.edges.clear();
        self.edge_set.clear();
        self.record_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Frame;

    fn record(symbols: &[&str], count: u64, size: u64) -> AllocationRecord {
        let frames = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Frame::new(format!("0x{:x}", i + 1), *s))
            .collect();
        AllocationRecord::new(frames, count, size)
    }

    #[test]
    fn test_intern_reuses_existing_child() {
        let mut graph = SymbolGraph::new();
        let a = graph.intern(None, "main");
        let b = graph.intern(Some(a), "foo");
        assert_eq!(graph.intern(None, "main"), a);
        assert_eq!(graph.intern(Some(a), "foo"), b);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_concatenation_collision_stays_distinct() {
        let graph = SymbolGraph::from_records(vec![
            record(&["ma", "in"], 1, 10),
            record(&["main"], 2, 20),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.find(&["ma", "in"]).unwrap().total_size, 10);
        assert_eq!(graph.find(&["main"]).unwrap().total_size, 20);
        assert_eq!(graph.find_by_path_key("main").unwrap().index, 1);
    }

    #[test]
    fn test_frameless_record_counts_but_adds_nothing() {
        let graph = SymbolGraph::from_records(vec![record(&[], 4, 64)]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.record_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut graph = SymbolGraph::from_records(vec![record(&["main", "foo"], 1, 1)]);
        graph.reset();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.record_count(), 0);

        graph.add_record(&record(&["other"], 1, 1));
        assert_eq!(graph.node(0).unwrap().name, "other");
    }

    #[test]
    fn test_recursive_symbol_has_no_self_edge() {
        let graph = SymbolGraph::from_records(vec![record(&["walk", "walk", "walk"], 1, 8)]);
        assert_eq!(graph.node_count(), 3);
        assert!(graph.edges().iter().all(|e| e.from != e.to));
        assert_eq!(graph.edges(), &[Edge::new(0, 1), Edge::new(1, 2)]);
    }
}
