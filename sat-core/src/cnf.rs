//! The data representation of a CNF instance and its partial assignment.
//!
//! Mirrors the teacher's `CNF`/`CNFClause`/`CNFVar` split (`solver/src/cnf.rs`),
//! but keeps a single per-name assignment map instead of per-occurrence
//! `value`/`assigned` fields (see `SPEC_FULL.md`, open question 2).

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::util::{HashMap, IndexMap};

/// An opaque, hashable, orderable variable identifier.
///
/// Holding an `Arc<str>` rather than `String` keeps clones of a `Cnf` (which
/// duplicate every literal occurrence) cheap: cloning a literal only bumps a
/// reference count.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarName(Arc<str>);

impl VarName {
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> VarName {
        VarName(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VarName {
    fn from(s: &str) -> VarName {
        VarName::new(s)
    }
}

impl From<String> for VarName {
    fn from(s: String) -> VarName {
        VarName::new(s)
    }
}

/// A literal: a variable name together with a polarity.
///
/// The final value of a literal under an assignment is `value` when
/// `polarity` is `true`, `!value` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub name: VarName,
    pub polarity: bool,
}

impl Literal {
    #[inline]
    pub fn new(name: VarName, polarity: bool) -> Literal {
        Literal { name, polarity }
    }

    #[inline]
    pub fn pos(name: VarName) -> Literal {
        Literal::new(name, true)
    }

    #[inline]
    pub fn neg(name: VarName) -> Literal {
        Literal::new(name, false)
    }

    /// The value this literal would need its variable to hold to become
    /// true, i.e. `polarity`.
    #[inline]
    pub fn satisfying_value(&self) -> bool {
        self.polarity
    }

    /// This literal's final truth value under `assignment`, or `None` if its
    /// variable is unassigned.
    #[inline]
    pub fn final_value(&self, assignment: &Assignment) -> Option<bool> {
        assignment
            .value(&self.name)
            .map(|value| value == self.polarity)
    }
}

impl std::ops::Neg for Literal {
    type Output = Literal;
    fn neg(mut self) -> Literal {
        self.polarity = !self.polarity;
        self
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.name)
        } else {
            write!(f, "-{}", self.name)
        }
    }
}

/// An ordered disjunction of literals. Order is preserved for reproducibility
/// of the tie-breaks in `reduce`; duplicates and tautologies are tolerated.
#[derive(Clone, Debug, Default)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    #[inline]
    pub fn new() -> Clause {
        Clause { literals: Vec::new() }
    }

    #[inline]
    pub fn single(lit: Literal) -> Clause {
        Clause { literals: vec![lit] }
    }

    #[inline]
    pub fn push(&mut self, lit: Literal) {
        self.literals.push(lit);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Clause {
        Clause { literals: iter.into_iter().collect() }
    }
}

impl IntoIterator for Clause {
    type Item = Literal;
    type IntoIter = std::vec::IntoIter<Literal>;
    fn into_iter(self) -> Self::IntoIter {
        self.literals.into_iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literals.iter().map(ToString::to_string).join(" "))
    }
}

/// A partial assignment of variable names to truth values, shared by every
/// literal occurrence of a given name.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: HashMap<VarName, bool>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment { values: HashMap::default() }
    }

    #[inline]
    pub fn is_assigned(&self, name: &VarName) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn value(&self, name: &VarName) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Assigns `name` to `value`. Idempotent: assigning the same value twice
    /// leaves the assignment unchanged.
    #[inline]
    pub fn assign(&mut self, name: VarName, value: bool) {
        self.values.insert(name, value);
    }

    /// Inverse of `assign`; a no-op if `name` was not assigned.
    #[inline]
    pub fn unassign(&mut self, name: &VarName) {
        self.values.remove(name);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// The location of one literal occurrence inside a `Cnf`'s clause array.
pub type Occurrence = (usize, usize);

/// A CNF instance: a sequence of clauses, the current partial assignment
/// shared by all their literals, and an index from variable name to every
/// occurrence of that name so that assigning a variable is
/// O(#occurrences) rather than O(#literals).
#[derive(Clone, Debug)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub assignment: Assignment,
    index: IndexMap<VarName, Vec<Occurrence>>,
}

impl Cnf {
    pub fn empty() -> Cnf {
        Cnf {
            clauses: Vec::new(),
            assignment: Assignment::new(),
            index: IndexMap::default(),
        }
    }

    /// Builds a `Cnf` from a clause list, constructing the occurrence index.
    pub fn new(clauses: Vec<Clause>) -> Cnf {
        let mut cnf = Cnf {
            clauses,
            assignment: Assignment::new(),
            index: IndexMap::default(),
        };
        cnf.rebuild_index();
        cnf
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (clause_idx, clause) in self.clauses.iter().enumerate() {
            for (lit_idx, lit) in clause.literals.iter().enumerate() {
                self.index
                    .entry(lit.name.clone())
                    .or_insert_with(Vec::new)
                    .push((clause_idx, lit_idx));
            }
        }
    }

    /// Variable names in first-occurrence order, the order `reduce`'s
    /// tie-breaks are defined against.
    #[inline]
    pub fn var_names(&self) -> impl Iterator<Item = &VarName> {
        self.index.keys()
    }

    #[inline]
    pub fn occurrences(&self, name: &VarName) -> Option<&[Occurrence]> {
        self.index.get(name).map(Vec::as_slice)
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.index.len()
    }

    pub fn literal_at(&self, occ: Occurrence) -> &Literal {
        &self.clauses[occ.0].literals[occ.1]
    }

    /// Assigns every occurrence of `name` so it evaluates to `value`.
    /// A no-op if `name` does not appear in this instance's index.
    pub fn assign(&mut self, name: &VarName, value: bool) {
        if self.index.contains_key(name) {
            self.assignment.assign(name.clone(), value);
        }
    }

    /// Assigns `name` so that `lit` becomes true.
    pub fn satisfy(&mut self, lit: &Literal) {
        self.assign(&lit.name, lit.satisfying_value());
    }

    pub fn unassign(&mut self, name: &VarName) {
        self.assignment.unassign(name);
    }

    /// A deep, reference-independent copy: the clause array and the
    /// assignment map are copied, and the index is rebuilt from the cloned
    /// clauses. O(total literals).
    pub fn deep_clone(&self) -> Cnf {
        let mut cnf = Cnf {
            clauses: self.clauses.clone(),
            assignment: self.assignment.clone(),
            index: IndexMap::default(),
        };
        cnf.rebuild_index();
        cnf
    }

    /// Ensures `name` has an index entry, even if it never occurs in any
    /// clause. Used by the DIMACS parser to keep header-declared variables
    /// present in the model (§8 "assignment totality").
    pub fn declare(&mut self, name: VarName) {
        self.index.entry(name).or_insert_with(Vec::new);
    }

    /// Assigns `false` to every indexed variable not yet assigned.
    ///
    /// All clauses being satisfied only requires *some* literal per clause to
    /// be assigned; pure-literal elimination and unit propagation can both
    /// satisfy every clause while leaving other indexed variables (including
    /// ones declared but never occurring in a clause) untouched. Called
    /// before a `Cnf` is handed out as a satisfying model so the returned
    /// assignment is total over every name in the index.
    pub fn complete(&mut self) {
        let unassigned: Vec<VarName> =
            self.var_names().filter(|name| !self.assignment.is_assigned(name)).cloned().collect();
        for name in unassigned {
            self.assign(&name, false);
        }
    }

    pub fn push(&mut self, clause: Clause) {
        let clause_idx = self.clauses.len();
        for (lit_idx, lit) in clause.literals.iter().enumerate() {
            self.index
                .entry(lit.name.clone())
                .or_insert_with(Vec::new)
                .push((clause_idx, lit_idx));
        }
        self.clauses.push(clause);
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(VarName::from(name), polarity)
    }

    #[test]
    fn index_tracks_all_occurrences() {
        let cnf = Cnf::new(vec![
            Clause::from_iter([lit("x", true), lit("y", false)]),
            Clause::from_iter([lit("x", false)]),
        ]);
        assert_eq!(cnf.occurrences(&VarName::from("x")).unwrap().len(), 2);
        assert_eq!(cnf.occurrences(&VarName::from("y")).unwrap().len(), 1);
        assert_eq!(cnf.num_variables(), 2);
    }

    #[test]
    fn assign_is_idempotent() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([lit("x", true)])]);
        cnf.assign(&VarName::from("x"), true);
        let once = cnf.clone();
        cnf.assign(&VarName::from("x"), true);
        assert_eq!(
            once.assignment.value(&VarName::from("x")),
            cnf.assignment.value(&VarName::from("x"))
        );
    }

    #[test]
    fn assign_unknown_name_is_a_no_op() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([lit("x", true)])]);
        cnf.assign(&VarName::from("z"), true);
        assert!(!cnf.assignment.is_assigned(&VarName::from("z")));
    }

    #[test]
    fn complete_assigns_false_to_every_unassigned_indexed_variable() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([lit("x", true)])]);
        cnf.declare(VarName::from("y"));
        cnf.assign(&VarName::from("x"), true);
        cnf.complete();
        assert_eq!(cnf.assignment.value(&VarName::from("x")), Some(true));
        assert_eq!(cnf.assignment.value(&VarName::from("y")), Some(false));
    }

    #[test]
    fn deep_clone_is_independent() {
        let cnf = Cnf::new(vec![Clause::from_iter([lit("x", true)])]);
        let mut clone = cnf.deep_clone();
        clone.assign(&VarName::from("x"), true);
        assert!(!cnf.assignment.is_assigned(&VarName::from("x")));
        assert!(clone.assignment.is_assigned(&VarName::from("x")));
    }

    #[test]
    fn literal_final_value_respects_polarity() {
        let mut assignment = Assignment::new();
        assignment.assign(VarName::from("x"), true);
        assert_eq!(lit("x", true).final_value(&assignment), Some(true));
        assert_eq!(lit("x", false).final_value(&assignment), Some(false));
        assert_eq!(lit("y", true).final_value(&assignment), None);
    }
}
