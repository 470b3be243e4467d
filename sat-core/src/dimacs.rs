//! A hand-rolled reader for the DIMACS-like CNF text format of §6: `c`
//! comment lines, one `p cnf <num_vars> <num_clauses>` header, then
//! whitespace-separated literals terminated by a `0` per clause.
//!
//! The external `dimacs` crate assumes integer-only literals; this format
//! treats variable names as opaque tokens (so reduction-generated or
//! symbolic names round-trip the same way), so the scan is hand-rolled
//! instead (see `DESIGN.md`).

use crate::cnf::{Clause, Cnf, Literal, VarName};
use crate::error::MalformedInput;

/// Parses `input` into a `Cnf`. Header-declared variables that never occur
/// in a clause are still present in the returned `Cnf`'s index (with no
/// occurrences), so the model stays total over every declared name.
pub fn parse(input: &str) -> Result<Cnf, MalformedInput> {
    let mut cnf = Cnf::empty();
    let mut header_seen = false;
    let mut declared_clauses = 0usize;
    let mut clauses_read = 0usize;
    let mut current = Clause::new();

    let total_lines = input.lines().count();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        if line.starts_with('p') {
            if header_seen {
                return Err(MalformedInput::new(line_no, "duplicate `p` header line"));
            }
            declared_clauses = parse_header(line, line_no, &mut cnf)?;
            header_seen = true;
            continue;
        }

        if !header_seen {
            return Err(MalformedInput::new(line_no, "clause data before `p cnf` header"));
        }

        for token in line.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|_| MalformedInput::new(line_no, format!("`{token}` is not an integer literal")))?;

            if value == 0 {
                cnf.push(std::mem::take(&mut current));
                clauses_read += 1;
                continue;
            }

            let polarity = value > 0;
            let name = VarName::from(value.unsigned_abs().to_string().as_str());
            current.push(Literal::new(name, polarity));
        }
    }

    if !header_seen {
        return Err(MalformedInput::new(0, "missing `p cnf` header"));
    }
    if !current.is_empty() {
        return Err(MalformedInput::new(total_lines, "input ended mid-clause, expected a terminating 0"));
    }
    if clauses_read != declared_clauses {
        return Err(MalformedInput::new(
            total_lines,
            format!("header declared {declared_clauses} clauses but {clauses_read} were read"),
        ));
    }

    Ok(cnf)
}

/// Parses `p cnf <num_vars> <num_clauses>`, declaring `1..=num_vars` in
/// `cnf` so unreferenced variables still end up in the model, and returns
/// `num_clauses`.
fn parse_header(line: &str, line_no: usize, cnf: &mut Cnf) -> Result<usize, MalformedInput> {
    let mut tokens = line.split_whitespace();

    let tag = tokens.next().expect("line is non-empty and starts with p");
    if tag != "p" {
        return Err(MalformedInput::new(line_no, format!("expected `p`, found `{tag}`")));
    }

    let format = tokens
        .next()
        .ok_or_else(|| MalformedInput::new(line_no, "missing format tag"))?;
    if format != "cnf" {
        return Err(MalformedInput::new(line_no, format!("unsupported format `{format}`, expected `cnf`")));
    }

    let num_vars: usize = tokens
        .next()
        .ok_or_else(|| MalformedInput::new(line_no, "missing variable count"))?
        .parse()
        .map_err(|_| MalformedInput::new(line_no, "variable count is not a number"))?;

    let num_clauses: usize = tokens
        .next()
        .ok_or_else(|| MalformedInput::new(line_no, "missing clause count"))?
        .parse()
        .map_err(|_| MalformedInput::new(line_no, "clause count is not a number"))?;

    for i in 1..=num_vars {
        cnf.declare(VarName::from(i.to_string().as_str()));
    }

    Ok(num_clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpll::solve_sequential;
    use crate::sat_solution::SatResult;

    #[test]
    fn scenario_a_single_unit_clause_is_sat() {
        let cnf = parse("p cnf 1 1\n1 0\n").unwrap();
        let result = solve_sequential(cnf);
        assert!(result.is_sat());
        assert_eq!(result.assignments().unwrap(), vec![(VarName::from("1"), true)]);
    }

    #[test]
    fn scenario_b_contradictory_units_are_unsat() {
        let cnf = parse("p cnf 1 2\n1 0\n-1 0\n").unwrap();
        assert!(solve_sequential(cnf).is_unsat());
    }

    #[test]
    fn scenario_c_three_var_formula_is_sat() {
        let cnf = parse("p cnf 3 2\n-1 2 3 0\n2 -3 0\n").unwrap();
        assert!(solve_sequential(cnf).is_sat());
    }

    #[test]
    fn scenario_e_unreferenced_declared_variables_stay_in_the_model() {
        let cnf = parse("p cnf 4 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n").unwrap();
        assert_eq!(cnf.num_variables(), 4);
        assert!(solve_sequential(cnf).is_unsat());
    }

    #[test]
    fn scenario_e_unreferenced_declared_variables_are_assigned_in_a_satisfiable_model() {
        // Variables 2 and 3 are declared but never occur in a clause.
        let cnf = parse("p cnf 3 1\n1 0\n").unwrap();
        match solve_sequential(cnf) {
            SatResult::Sat(model) => {
                for name in ["1", "2", "3"] {
                    assert!(
                        model.assignment.is_assigned(&VarName::from(name)),
                        "variable {name} missing from the returned model, not just defaulted on display"
                    );
                }
            }
            SatResult::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let cnf = parse("c a comment\n\np cnf 1 1\nc another comment\n1 0\n").unwrap();
        assert!(solve_sequential(cnf).is_sat());
    }

    #[test]
    fn clause_may_span_multiple_lines() {
        let cnf = parse("p cnf 3 1\n1 2\n3 0\n").unwrap();
        assert_eq!(cnf.clauses.len(), 1);
        assert_eq!(cnf.clauses[0].len(), 3);
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = parse("1 0\n").unwrap_err();
        assert!(err.reason.contains("header"));
    }

    #[test]
    fn non_integer_token_is_malformed() {
        let err = parse("p cnf 1 1\nfoo 0\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn clause_count_mismatch_is_malformed() {
        let err = parse("p cnf 1 2\n1 0\n").unwrap_err();
        assert!(err.reason.contains("clauses"));
    }

    #[test]
    fn truncated_clause_is_malformed() {
        let err = parse("p cnf 2 1\n1 2").unwrap_err();
        assert!(err.reason.contains("mid-clause"));
    }
}
