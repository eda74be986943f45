// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! Dense numbering of the variable names occurring in a flow.

use bimap::btree::BiBTreeMap;

use crate::control_flow_graph::{ControlFlowGraph, InstructionKind};

/// A bijection from variable name to a dense integer in `0..K`.
///
/// Indices are assigned in first-occurrence order over the instruction
/// sequence, which makes them reproducible across runs; beyond that they are
/// opaque keys. Immutable once built, scoped to one analysis run.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: BiBTreeMap<String, usize>,
}

impl NameIndex {
    /// Scan the graph in instruction order and number each distinct variable
    /// name on first occurrence. Reads and writes both count.
    pub fn build(graph: &ControlFlowGraph) -> Self {
        let mut names = BiBTreeMap::new();
        for instruction in graph.instructions() {
            if let InstructionKind::VariableAccess { name, .. } = &instruction.kind {
                if !names.contains_left(name) {
                    let next = names.len();
                    names.insert(name.clone(), next);
                }
            }
        }
        Self { names }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_by_left(name).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get_by_right(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
