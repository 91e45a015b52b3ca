//! Dependencies between the modules of one build.
//!
//! Nodes are the modules registered in the [`ModuleGraph`]; an edge `a → b`
//! means module `a` declares a project dependency on module `b`, labelled with
//! the Gradle configuration it is declared under. The graph answers two
//! questions Gradle would otherwise only answer at build time: whether the
//! modules depend on each other in a cycle, and in which order they build.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::dependency_processing::DependencyProcessor;
use super::module_graph::{ModuleEntry, ModuleGraph};
use super::scope::Configuration;
use crate::core::PomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// One edge of the exported graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEdge {
    pub from: String,
    pub to: String,
    pub configuration: Configuration,
}

/// Serialisable form of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ModuleEntry>,
    pub edges: Vec<ModuleEdge>,
}

/// Project dependencies between registered modules.
#[derive(Debug, Default)]
pub struct ModuleDependencyGraph {
    graph: DiGraph<ModuleEntry, Configuration>,
    node_map: HashMap<String, NodeIndex>,
}

impl ModuleDependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the dependency plans of every registered module.
    pub fn build(processor: &DependencyProcessor<'_>, modules: &ModuleGraph) -> Result<Self, PomError> {
        let mut graph = Self::new();
        for entry in modules.entries() {
            graph.add_module(entry.clone());
        }
        for entry in modules.entries() {
            let plan = processor.declarations(entry.id)?;
            for declaration in &plan.declarations {
                if let Some(target) = declaration.module_path() {
                    graph.add_dependency(&entry.path, target, declaration.configuration);
                }
            }
        }
        tracing::debug!(
            "Module dependency graph: {} module(s), {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Add a module node; known paths are left untouched.
    pub fn add_module(&mut self, entry: ModuleEntry) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&entry.path) {
            return index;
        }
        let path = entry.path.clone();
        let index = self.graph.add_node(entry);
        self.node_map.insert(path, index);
        index
    }

    /// Record that module `from` depends on module `to`.
    ///
    /// Unknown paths are ignored. The same pair is recorded once per configuration.
    pub fn add_dependency(&mut self, from: &str, to: &str, configuration: Configuration) {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to)) else {
            tracing::debug!("Ignoring dependency between unregistered modules {from} -> {to}");
            return;
        };
        let exists = self
            .graph
            .edges_connecting(from_idx, to_idx)
            .any(|edge| *edge.weight() == configuration);
        if !exists {
            self.graph.add_edge(from_idx, to_idx, configuration);
        }
    }

    /// Fail with [`PomError::ModuleCycle`] when modules depend on each other in a loop.
    pub fn detect_cycles(&self) -> Result<(), PomError> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut path = Vec::new();

        for node in self.graph.node_indices() {
            if colors.get(&node) == Some(&Color::White)
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                let cycle = cycle
                    .iter()
                    .map(|&idx| self.graph[idx].path.as_str())
                    .collect::<Vec<_>>()
                    .join(" → ");
                return Err(PomError::ModuleCycle { cycle });
            }
        }
        Ok(())
    }

    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let start = path.iter().position(|&n| n == neighbor).unwrap_or_default();
                    let mut cycle = path[start..].to_vec();
                    cycle.push(neighbor);
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Module paths with every dependency before its dependents.
    pub fn build_order(&self) -> Result<Vec<String>, PomError> {
        self.detect_cycles()?;
        let indices = toposort(&self.graph, None).map_err(|cycle| PomError::ModuleCycle {
            cycle: self.graph[cycle.node_id()].path.clone(),
        })?;
        Ok(indices.into_iter().rev().map(|idx| self.graph[idx].path.clone()).collect())
    }

    /// Paths of the modules `path` depends on directly.
    #[must_use]
    pub fn direct_dependencies(&self, path: &str) -> Vec<String> {
        let Some(&index) = self.node_map.get(path) else {
            return Vec::new();
        };
        let mut deps: Vec<String> =
            self.graph.neighbors(index).map(|idx| self.graph[idx].path.clone()).collect();
        deps.sort();
        deps.dedup();
        deps
    }

    #[must_use]
    pub fn export(&self) -> GraphExport {
        let nodes = self.graph.node_indices().map(|idx| self.graph[idx].clone()).collect();
        let mut edges: Vec<ModuleEdge> = self
            .graph
            .edge_references()
            .map(|edge| ModuleEdge {
                from: self.graph[edge.source()].path.clone(),
                to: self.graph[edge.target()].path.clone(),
                configuration: *edge.weight(),
            })
            .collect();
        edges.sort_by(|a, b| (&a.from, &a.to, a.configuration).cmp(&(&b.from, &b.to, b.configuration)));
        GraphExport { nodes, edges }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
