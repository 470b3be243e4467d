//! Unit propagation, pure-literal elimination and first-unassigned
//! selection: the three pure queries the sequential and parallel engines
//! drive their branching from.

use crate::cnf::{Cnf, Literal, VarName};
use crate::eval;
use crate::util::HashMap;

/// Returns a literal that is the unique unassigned literal in some
/// currently-unsatisfied clause, or `None`. Ties are broken by first
/// occurrence in clause order, then intra-clause order.
pub fn unit_clause(cnf: &Cnf) -> Option<Literal> {
    cnf.clauses
        .iter()
        .find_map(|clause| eval::unit_literal(clause, &cnf.assignment))
        .cloned()
}

/// Returns a name together with a polarity such that, considering only
/// currently-unsatisfied clauses, the name occurs with exactly one
/// polarity, and the name itself is still unassigned.
///
/// Every literal occurrence in every unsatisfied clause contributes to the
/// polarity scan regardless of whether that occurrence's own variable
/// happens to be assigned elsewhere — gating the scan on assignment state
/// would make this a no-op before any variable is ever set (see
/// `SPEC_FULL.md`, open question on pure-literal detection).
pub fn pure_literal(cnf: &Cnf) -> Option<Literal> {
    let mut polarities: HashMap<&VarName, PolaritySet> = HashMap::default();
    for clause in &cnf.clauses {
        if eval::is_satisfied(clause, &cnf.assignment) {
            continue;
        }
        for lit in &clause.literals {
            polarities.entry(&lit.name).or_default().record(lit.polarity);
        }
    }

    cnf.var_names().find_map(|name| {
        if cnf.assignment.is_assigned(name) {
            return None;
        }
        match polarities.get(name)?.single_polarity() {
            Some(polarity) => Some(Literal::new(name.clone(), polarity)),
            None => None,
        }
    })
}

/// Returns the first variable that is unassigned in index order, or `None`.
pub fn first_unassigned(cnf: &Cnf) -> Option<VarName> {
    cnf.var_names()
        .find(|name| !cnf.assignment.is_assigned(name))
        .cloned()
}

#[derive(Default)]
struct PolaritySet {
    positive: bool,
    negative: bool,
}

impl PolaritySet {
    fn record(&mut self, polarity: bool) {
        if polarity {
            self.positive = true;
        } else {
            self.negative = true;
        }
    }

    fn single_polarity(&self) -> Option<bool> {
        match (self.positive, self.negative) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}
