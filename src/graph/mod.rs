//! The directed-graph view of a workflow shared by validation and comparison.
//!
//! Nodes are step `systemName`s and edges are the resolved connection targets
//! of every action on a step. Targets that name no step are kept as edges so
//! callers can report them; traversals treat them as leaves.

use crate::model::Workflow;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

/// Step name -> distinct target step names, in slot order of first appearance.
pub type Adjacency = AHashMap<String, Vec<String>>;

/// Builds the adjacency map for a workflow.
///
/// Every step gets an entry, including steps without outgoing edges. Steps
/// sharing a `systemName` have their edges merged.
pub fn build_adjacency(workflow: &Workflow) -> Adjacency {
    let mut adjacency: Adjacency = AHashMap::new();
    for step in &workflow.steps {
        let targets = adjacency.entry(step.system_name.clone()).or_default();
        for action in &step.actions {
            for (_, target) in action.connection_targets() {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
    }
    adjacency
}

/// An edge that closes a cycle: `to` was already on the DFS stack when reached from `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Copy)]
enum Visit {
    OnStack,
    Done,
}

/// Adjacency plus the declaration order of steps, so traversals are deterministic.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    nodes: Vec<String>,
    adjacency: Adjacency,
}

impl WorkflowGraph {
    pub fn new(workflow: &Workflow) -> Self {
        let nodes = workflow
            .steps
            .iter()
            .map(|s| s.system_name.clone())
            .unique()
            .collect();
        Self {
            nodes,
            adjacency: build_adjacency(workflow),
        }
    }

    /// Distinct step names in declaration order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn contains(&self, step: &str) -> bool {
        self.adjacency.contains_key(step)
    }

    pub fn successors(&self, step: &str) -> &[String] {
        self.adjacency
            .get(step)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every name that appears as a connection target anywhere in the workflow.
    pub fn targets(&self) -> AHashSet<&str> {
        self.adjacency
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Finds the first back edge in a depth-first walk from each step in declaration order.
    ///
    /// Uses an explicit stack, so graph depth is bounded by memory rather than
    /// the call stack. Stops at the first cycle; it does not enumerate them all.
    pub fn find_cycle(&self) -> Option<CycleEdge> {
        let mut state: AHashMap<&str, Visit> = AHashMap::with_capacity(self.nodes.len());

        for root in &self.nodes {
            if state.contains_key(root.as_str()) {
                continue;
            }
            state.insert(root.as_str(), Visit::OnStack);
            // (node, index of the next successor to visit)
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let successors = self.successors(node);
                if frame.1 >= successors.len() {
                    state.insert(node, Visit::Done);
                    stack.pop();
                    continue;
                }
                let next = successors[frame.1].as_str();
                frame.1 += 1;

                match state.get(next) {
                    Some(Visit::OnStack) => {
                        return Some(CycleEdge {
                            from: node.to_string(),
                            to: next.to_string(),
                        });
                    }
                    Some(Visit::Done) => {}
                    None => {
                        state.insert(next, Visit::OnStack);
                        stack.push((next, 0));
                    }
                }
            }
        }
        None
    }

    /// Breadth-first closure of `starts`. Start names that are not steps are ignored.
    pub fn reachable_from<'a, I>(&'a self, starts: I) -> AHashSet<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        for start in starts {
            if let Some((name, _)) = self.adjacency.get_key_value(start) {
                if seen.insert(name.as_str()) {
                    queue.push_back(name.as_str());
                }
            }
        }
        while let Some(node) = queue.pop_front() {
            for next in self.successors(node) {
                if self.contains(next) && seen.insert(next.as_str()) {
                    queue.push_back(next.as_str());
                }
            }
        }
        seen
    }
}
