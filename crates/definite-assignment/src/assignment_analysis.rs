// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! Definite assignment analysis.
//!
//! A single forward sweep over the instructions in reverse-postorder order
//! propagates the set of definitely assigned variables across forward edges
//! and reports every read not covered by a prior write on all paths. The
//! meet at merge points is set intersection: a variable is guaranteed
//! assigned there only if it is guaranteed on every incoming forward path
//! processed so far.
//!
//! Facts are not propagated across back edges, so each instruction is
//! visited exactly once and no fixpoint iteration takes place. A variable
//! assigned only inside a loop body can therefore still be reported at a
//! loop-carried read even when every execution assigns it on the previous
//! iteration. Callers relying on the historical diagnostic output depend on
//! this behavior.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::control_flow_graph::{ControlFlowGraph, InstructionKind};
use crate::error::Result;
use crate::name_index::NameIndex;
use crate::postorder::PostorderNumbering;

/// A read of a variable that is not preceded by a write on every path from
/// the entry instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Index of the offending read instruction.
    pub instruction: usize,
    /// Name of the variable being read.
    pub name: String,
}

/// Report every variable read not covered by a prior write on all paths.
///
/// Findings come back in discovery order, which is ascending postorder rank;
/// re-running on an unmodified graph yields the identical sequence.
pub fn find_reads_without_prior_writes(graph: &ControlFlowGraph) -> Result<Vec<Finding>> {
    let names = NameIndex::build(graph);
    let numbering = PostorderNumbering::compute(graph)?;
    let ranks = numbering.ranks();

    debug!(
        "definite assignment over {} instructions, {} variables",
        graph.instruction_count(),
        names.len()
    );

    // One fact slot per instruction ordinal. `None` means no information has
    // reached the instruction yet, which is distinct from `Some(empty)`:
    // reachable, but nothing guaranteed assigned.
    let mut assigned: Vec<Option<BTreeSet<usize>>> = vec![None; graph.instruction_count()];
    let mut findings = Vec::new();

    for &curr in numbering.reverse_postorder() {
        if let InstructionKind::VariableAccess { name, is_write } = graph.kind_of(curr)? {
            let variable = match names.index_of(name) {
                Some(variable) => variable,
                // The index was built from this same graph, so every
                // accessed name is present.
                None => continue,
            };
            if *is_write {
                assigned[curr].get_or_insert_with(BTreeSet::new).insert(variable);
            } else {
                let covered = assigned[curr]
                    .as_ref()
                    .map_or(false, |vars| vars.contains(&variable));
                if !covered {
                    findings.push(Finding {
                        instruction: curr,
                        name: name.clone(),
                    });
                }
            }
        }

        // Propagate only across forward edges; edges into an equal or lower
        // rank are back or cross edges and stay out of the single sweep.
        let curr_fact = assigned[curr].clone();
        for &succ in graph.successors_of(curr)? {
            if ranks[succ] <= ranks[curr] {
                continue;
            }
            match &curr_fact {
                Some(curr_set) => match &mut assigned[succ] {
                    Some(succ_set) => {
                        succ_set.retain(|variable| curr_set.contains(variable));
                    }
                    slot => *slot = Some(curr_set.clone()),
                },
                // Nothing can be inherited from an instruction with no
                // information.
                None => match &mut assigned[succ] {
                    Some(succ_set) => succ_set.clear(),
                    slot => *slot = Some(BTreeSet::new()),
                },
            }
        }
    }

    Ok(findings)
}
