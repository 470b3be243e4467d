//! The sequential DPLL engine: an iterative backtracking search driven by
//! an explicit stack of alternative partial models.
//!
//! Recursion is deliberately avoided — search depth is proportional to the
//! variable count and easily exceeds native stack limits on large
//! instances.

use crate::cnf::{Cnf, VarName};
use crate::eval;
use crate::reduce;
use crate::sat_solution::SatResult;

/// Runs DPLL to completion and returns the result. See the module docs for
/// the backtracking discipline.
pub fn solve_sequential(cnf: Cnf) -> SatResult {
    let mut stack = vec![cnf];

    while let Some(top) = stack.last_mut() {
        if top.clauses.iter().all(|clause| eval::is_satisfied(clause, &top.assignment)) {
            let mut model = stack.pop().expect("stack non-empty");
            model.complete();
            return SatResult::Sat(model);
        }

        if top.clauses.iter().any(|clause| eval::is_falsified(clause, &top.assignment)) {
            stack.pop();
            continue;
        }

        // Fixed rule priority: unit propagation, then pure-literal
        // elimination, then branching. Each application either finishes
        // the branch or strictly reduces the unassigned-variable count of
        // `top`, so the loop terminates for any finite CNF.
        if let Some(lit) = reduce::unit_clause(top) {
            top.satisfy(&lit);
            continue;
        }

        if let Some(lit) = reduce::pure_literal(top) {
            top.satisfy(&lit);
            continue;
        }

        if let Some(name) = reduce::first_unassigned(top) {
            branch(&mut stack, name);
            continue;
        }

        // No undetermined clause and no unassigned variable, yet neither
        // all-satisfied nor some-falsified fired. Unreachable for a
        // well-formed instance (a total assignment always resolves every
        // clause one way or the other), kept as the defensive fallback
        // the spec describes.
        stack.pop();
    }

    SatResult::Unsat
}

/// Splits the top of `stack` into two sibling partial models that differ
/// only in the assignment of `var`. The sibling pushed on top (explored
/// next) takes `var = true`; the instance left underneath keeps `var =
/// false` for the engine to fall back to once the new top's subtree is
/// exhausted.
fn branch(stack: &mut Vec<Cnf>, var: VarName) {
    let mut sibling = stack
        .last()
        .expect("branch is only called with a non-empty stack")
        .deep_clone();

    stack.last_mut().expect("non-empty").assign(&var, false);
    sibling.assign(&var, true);
    stack.push(sibling);
}
