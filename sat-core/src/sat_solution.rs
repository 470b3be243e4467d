//! The result type returned by `dpll::solve_sequential` and
//! `parallel::solve_parallel`.

use crate::cnf::{Cnf, VarName};

/// Either `Unsat`, or `Sat` together with a `Cnf` whose assignment totals
/// satisfy every one of its clauses.
#[derive(Clone, Debug)]
pub enum SatResult {
    Sat(Cnf),
    Unsat,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SatResult::Unsat)
    }

    /// The model's assignments in the `Cnf`'s variable-index order, or
    /// `None` for `Unsat`.
    pub fn assignments(&self) -> Option<Vec<(VarName, bool)>> {
        match self {
            SatResult::Sat(cnf) => Some(
                cnf.var_names()
                    .map(|name| (name.clone(), cnf.assignment.value(name).unwrap_or(false)))
                    .collect(),
            ),
            SatResult::Unsat => None,
        }
    }
}

impl PartialEq for SatResult {
    /// Agreement only, per the testable property that two solvers may
    /// disagree on which model they return but never on the SAT/UNSAT tag.
    fn eq(&self, other: &SatResult) -> bool {
        self.is_sat() == other.is_sat()
    }
}
