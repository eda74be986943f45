// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! The instruction-level control flow graph handed in by the front end.
//!
//! The graph is an ordered sequence of instructions with the entry at
//! index 0. An instruction's index is its position in that sequence and is
//! stable for the lifetime of the graph. Successor lists keep their edge
//! order; back edges forming cycles are allowed. The graph is read-only to
//! the analysis.

use codespan::Span;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Payload of a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Control or computation carrying no variable-assignment fact
    /// (branches, calls, ...).
    Generic,
    /// A read or write of a named variable.
    VariableAccess { name: String, is_write: bool },
}

/// A node in the control flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Instruction indices reachable by one control flow step, in edge order.
    pub successors: Vec<usize>,
    pub kind: InstructionKind,
    /// Source region the instruction was built from, if the front end
    /// provides one.
    pub span: Option<Span>,
}

impl Instruction {
    pub fn generic(successors: Vec<usize>) -> Self {
        Self {
            successors,
            kind: InstructionKind::Generic,
            span: None,
        }
    }

    pub fn read(name: impl Into<String>, successors: Vec<usize>) -> Self {
        Self {
            successors,
            kind: InstructionKind::VariableAccess {
                name: name.into(),
                is_write: false,
            },
            span: None,
        }
    }

    pub fn write(name: impl Into<String>, successors: Vec<usize>) -> Self {
        Self {
            successors,
            kind: InstructionKind::VariableAccess {
                name: name.into(),
                is_write: true,
            },
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// An ordered sequence of instructions with a designated entry at index 0.
///
/// Every instruction is expected to be reachable from the entry by following
/// successor edges; [`crate::postorder::PostorderNumbering::compute`] reports
/// a violation as [`AnalysisError::UnreachableInstruction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlFlowGraph {
    instructions: Vec<Instruction>,
}

impl ControlFlowGraph {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The entry instruction index.
    pub fn entry(&self) -> usize {
        0
    }

    pub fn instruction(&self, index: usize) -> Result<&Instruction> {
        self.instructions.get(index).ok_or(AnalysisError::IndexOutOfBounds {
            index,
            count: self.instructions.len(),
        })
    }

    pub fn successors_of(&self, index: usize) -> Result<&[usize]> {
        Ok(self.instruction(index)?.successors.as_slice())
    }

    pub fn kind_of(&self, index: usize) -> Result<&InstructionKind> {
        Ok(&self.instruction(index)?.kind)
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

/// Render the graph in dot format for debugging.
pub fn generate_cfg_in_dot_format(graph: &ControlFlowGraph) -> String {
    let mut dot = String::from("digraph cfg {\n");
    for (index, instruction) in graph.instructions().enumerate() {
        let label = match &instruction.kind {
            InstructionKind::Generic => format!("{}: generic", index),
            InstructionKind::VariableAccess { name, is_write } => {
                let access = if *is_write { "write" } else { "read" };
                format!("{}: {} {}", index, access, name)
            }
        };
        dot.push_str(&format!(
            "    {} [label=\"{}\"];\n",
            index,
            label.replace('"', "\\\"")
        ));
    }
    for (index, instruction) in graph.instructions().enumerate() {
        for succ in &instruction.successors {
            dot.push_str(&format!("    {} -> {};\n", index, succ));
        }
    }
    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_reported() {
        let graph = ControlFlowGraph::new(vec![Instruction::generic(vec![])]);
        assert!(graph.instruction(0).is_ok());
        assert_eq!(
            graph.instruction(3),
            Err(AnalysisError::IndexOutOfBounds { index: 3, count: 1 })
        );
        assert_eq!(
            graph.kind_of(1),
            Err(AnalysisError::IndexOutOfBounds { index: 1, count: 1 })
        );
    }

    #[test]
    fn dot_dump_lists_every_node_and_edge() {
        let graph = ControlFlowGraph::new(vec![
            Instruction::write("x", vec![1]),
            Instruction::read("x", vec![]),
        ]);
        let dot = generate_cfg_in_dot_format(&graph);
        assert!(dot.contains("0 [label=\"0: write x\"]"));
        assert!(dot.contains("1 [label=\"1: read x\"]"));
        assert!(dot.contains("0 -> 1;"));
    }
}
