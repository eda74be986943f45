// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Structural errors surfaced while analyzing a control flow graph.
///
/// Both variants indicate a malformed input from the front end; the analysis
/// itself never fails on a well-formed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An instruction or successor index falls outside the graph.
    #[error("instruction index {index} is out of bounds for a flow of {count} instructions")]
    IndexOutOfBounds { index: usize, count: usize },
    /// An instruction has no path from the entry instruction, violating the
    /// reachability precondition. Reported instead of producing an
    /// inconsistent rank table.
    #[error("instruction {instruction} is not reachable from the entry instruction")]
    UnreachableInstruction { instruction: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
