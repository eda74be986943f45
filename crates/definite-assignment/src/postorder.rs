// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! Postorder numbering of a control flow graph.
//!
//! A depth-first traversal from the entry instruction assigns each
//! instruction a rank from a counter that starts at N and is decremented as
//! instructions finish. The entry is visited first and finishes last, so the
//! entry always receives rank 0 and ranks grow with finish depth. Reading the
//! inverse table front to back therefore visits the entry first — that table
//! is the processing order for the single forward dataflow sweep.
//!
//! The traversal uses an explicit stack; deep linear chains must not be able
//! to exhaust the call stack.

use itertools::Itertools;
use log::debug;

use crate::control_flow_graph::ControlFlowGraph;
use crate::error::{AnalysisError, Result};

/// Postorder ranks and the derived reverse-postorder order of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostorderNumbering {
    /// `ranks[instruction]` is the instruction's postorder rank.
    ranks: Vec<usize>,
    /// `order[rank]` is the instruction holding that rank.
    order: Vec<usize>,
}

impl PostorderNumbering {
    /// Traverse the graph depth first from the entry and number every
    /// instruction.
    ///
    /// Successors are explored in edge order. A successor index outside the
    /// graph fails with [`AnalysisError::IndexOutOfBounds`]; an instruction
    /// never reached from the entry fails with
    /// [`AnalysisError::UnreachableInstruction`].
    pub fn compute(graph: &ControlFlowGraph) -> Result<Self> {
        let count = graph.instruction_count();
        if count == 0 {
            return Ok(Self {
                ranks: Vec::new(),
                order: Vec::new(),
            });
        }

        let mut ranks: Vec<Option<usize>> = vec![None; count];
        let mut visited = vec![false; count];
        let mut counter = count;

        // Each frame is (instruction, position of the next successor edge to
        // explore). Pushing a frame corresponds to entering the recursive
        // visit; popping it assigns the rank.
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(count);
        visited[graph.entry()] = true;
        stack.push((graph.entry(), 0));

        while let Some(&mut (curr, ref mut pos)) = stack.last_mut() {
            let succs = graph.successors_of(curr)?;
            if let Some(&succ) = succs.get(*pos) {
                *pos += 1;
                if succ >= count {
                    return Err(AnalysisError::IndexOutOfBounds { index: succ, count });
                }
                if !visited[succ] {
                    visited[succ] = true;
                    stack.push((succ, 0));
                }
            } else {
                counter -= 1;
                ranks[curr] = Some(counter);
                stack.pop();
            }
        }

        if counter != 0 {
            // The counter only reaches zero when every instruction finished.
            let instruction = ranks.iter().position(Option::is_none).unwrap_or(0);
            return Err(AnalysisError::UnreachableInstruction { instruction });
        }

        // All ranks were assigned above.
        let ranks: Vec<usize> = ranks.into_iter().flatten().collect();
        let mut order = vec![0; count];
        for (instruction, &rank) in ranks.iter().enumerate() {
            order[rank] = instruction;
        }

        debug!("reverse postorder: [{}]", order.iter().join(", "));
        Ok(Self { ranks, order })
    }

    pub fn rank_of(&self, instruction: usize) -> Option<usize> {
        self.ranks.get(instruction).copied()
    }

    /// Rank per instruction, indexed by instruction.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Instructions sorted by ascending rank; the entry comes first.
    pub fn reverse_postorder(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_flow_graph::Instruction;

    fn diamond() -> ControlFlowGraph {
        ControlFlowGraph::new(vec![
            Instruction::generic(vec![1, 2]),
            Instruction::generic(vec![3]),
            Instruction::generic(vec![3]),
            Instruction::generic(vec![]),
        ])
    }

    #[test]
    fn ranks_are_a_permutation_with_entry_at_zero() {
        let numbering = PostorderNumbering::compute(&diamond()).unwrap();
        let mut seen = numbering.ranks().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(numbering.rank_of(0), Some(0));
    }

    #[test]
    fn order_is_the_inverse_of_ranks() {
        let numbering = PostorderNumbering::compute(&diamond()).unwrap();
        for instruction in 0..numbering.len() {
            let rank = numbering.rank_of(instruction).unwrap();
            assert_eq!(numbering.reverse_postorder()[rank], instruction);
        }
    }

    #[test]
    fn back_edges_do_not_affect_termination() {
        let graph = ControlFlowGraph::new(vec![
            Instruction::generic(vec![1]),
            Instruction::generic(vec![2, 3]),
            Instruction::generic(vec![1]),
            Instruction::generic(vec![]),
        ]);
        let numbering = PostorderNumbering::compute(&graph).unwrap();
        assert_eq!(numbering.rank_of(0), Some(0));
        assert_eq!(numbering.len(), 4);
    }

    #[test]
    fn unreachable_instruction_is_an_error() {
        let graph = ControlFlowGraph::new(vec![
            Instruction::generic(vec![1]),
            Instruction::generic(vec![]),
            Instruction::generic(vec![1]),
        ]);
        assert_eq!(
            PostorderNumbering::compute(&graph),
            Err(AnalysisError::UnreachableInstruction { instruction: 2 })
        );
    }

    #[test]
    fn out_of_range_successor_is_an_error() {
        let graph = ControlFlowGraph::new(vec![
            Instruction::generic(vec![1]),
            Instruction::generic(vec![7]),
        ]);
        assert_eq!(
            PostorderNumbering::compute(&graph),
            Err(AnalysisError::IndexOutOfBounds { index: 7, count: 2 })
        );
    }

    #[test]
    fn deep_linear_chain_does_not_exhaust_the_stack() {
        let count = 200_000;
        let mut instructions = Vec::with_capacity(count);
        for index in 0..count - 1 {
            instructions.push(Instruction::generic(vec![index + 1]));
        }
        instructions.push(Instruction::generic(vec![]));
        let numbering = PostorderNumbering::compute(&ControlFlowGraph::new(instructions)).unwrap();
        assert_eq!(numbering.rank_of(0), Some(0));
        assert_eq!(numbering.rank_of(count - 1), Some(count - 1));
    }

    #[test]
    fn empty_graph_yields_empty_numbering() {
        let numbering = PostorderNumbering::compute(&ControlFlowGraph::default()).unwrap();
        assert!(numbering.is_empty());
    }
}
