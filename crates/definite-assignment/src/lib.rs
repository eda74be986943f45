// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! Definite assignment analysis over instruction-level control flow graphs.
//!
//! A language front end hands this crate a fully constructed
//! [`ControlFlowGraph`] and receives back the variable reads that are not
//! covered by a prior write on every execution path from the entry
//! instruction. The pipeline is:
//!
//! - [`control_flow_graph`] holds the immutable graph model supplied by the
//!   front end.
//! - [`name_index`] numbers the variable names occurring in the flow.
//! - [`postorder`] computes the postorder ranks (entry ranked 0) and the
//!   reverse-postorder processing order.
//! - [`assignment_analysis`] runs the single forward sweep and produces the
//!   findings.
//! - [`diagnostics`] turns findings into reportable warnings.
//!
//! The graph stays read-only for the whole run; all working state is owned by
//! one invocation, so distinct graphs can be analyzed from independent
//! threads without coordination.

pub mod assignment_analysis;
pub mod control_flow_graph;
pub mod diagnostics;
pub mod error;
pub mod name_index;
pub mod postorder;

pub use assignment_analysis::{find_reads_without_prior_writes, Finding};
pub use control_flow_graph::{
    generate_cfg_in_dot_format, ControlFlowGraph, Instruction, InstructionKind,
};
pub use error::{AnalysisError, Result};
pub use name_index::NameIndex;
pub use postorder::PostorderNumbering;
