// Copyright (c) Asymptotic
// SPDX-License-Identifier: Apache-2.0

//! Reporting of findings as user-visible diagnostics.

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::assignment_analysis::Finding;
use crate::control_flow_graph::ControlFlowGraph;

/// Turn findings into warnings, labeled at the offending instruction's
/// source span where the front end supplied one.
pub fn findings_to_diagnostics<FileId: Copy>(
    graph: &ControlFlowGraph,
    findings: &[Finding],
    file_id: FileId,
) -> Vec<Diagnostic<FileId>> {
    findings
        .iter()
        .map(|finding| {
            let mut diagnostic = Diagnostic::warning()
                .with_code("definite-assignment")
                .with_message(format!(
                    "variable `{}` may be used before it is assigned",
                    finding.name
                ));
            let span = graph
                .instruction(finding.instruction)
                .ok()
                .and_then(|instruction| instruction.span);
            if let Some(span) = span {
                diagnostic = diagnostic.with_labels(vec![Label::primary(file_id, span)]);
            }
            diagnostic
        })
        .collect()
}
