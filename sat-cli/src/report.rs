//! Turns a solved `Cnf` into the text printed by the CLI: a plain
//! `name: value` listing for direct SAT queries, or a reduction-specific
//! re-interpretation for the graph front ends. Layered entirely on top of
//! `sat_core`'s public API.

use std::cmp::Ordering;

use sat_core::{Cnf, VarName};

use crate::config::Reduction;
use crate::reductions;

pub const UNSATISFIABLE: &str = "Unsatisfiable.";

/// One `name: true|false` line per unique name, in the stable order of §6:
/// names that are entirely digits compare numerically, else lexically.
pub fn format_model(cnf: &Cnf) -> String {
    let mut names: Vec<&VarName> = cnf.var_names().collect();
    names.sort_by(|a, b| compare_names(a.as_str(), b.as_str()));
    names
        .into_iter()
        .map(|name| format!("{name}: {}", cnf.assignment.value(name).unwrap_or(false)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Re-interprets a satisfying model back into the vocabulary of the
/// reduction that generated it.
pub fn format_reduction(reduction: Reduction, cnf: &Cnf) -> String {
    match reduction {
        Reduction::IndependentSet => format_independent_set(cnf),
        Reduction::ThreeColorable => format_coloring(cnf),
        Reduction::HamiltonianPath => format_hamiltonian_path(cnf),
    }
}

fn format_independent_set(cnf: &Cnf) -> String {
    let mut members: Vec<usize> = cnf
        .var_names()
        .filter_map(|name| parse_prefixed(name.as_str(), "v", ""))
        .filter(|&v| cnf.assignment.value(&reductions::independent_set_var(v)) == Some(true))
        .collect();
    members.sort_unstable();
    format!("Independent set: {{{}}}", members.iter().map(usize::to_string).collect::<Vec<_>>().join(", "))
}

fn format_coloring(cnf: &Cnf) -> String {
    let mut vertices: Vec<usize> =
        cnf.var_names().filter_map(|name| parse_pair(name.as_str(), "v", "_c")).map(|(v, _)| v).collect();
    vertices.sort_unstable();
    vertices.dedup();

    let lines: Vec<String> = vertices
        .into_iter()
        .map(|v| {
            let color = (0..3)
                .find(|&c| cnf.assignment.value(&reductions::color_var(v, c)) == Some(true))
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("vertex {v}: color {color}")
        })
        .collect();
    lines.join("\n")
}

fn format_hamiltonian_path(cnf: &Cnf) -> String {
    let mut vertices: Vec<usize> =
        cnf.var_names().filter_map(|name| parse_pair(name.as_str(), "v", "_p")).map(|(v, _)| v).collect();
    vertices.sort_unstable();
    vertices.dedup();
    let n = vertices.len();

    let mut path = vec![None; n];
    for &v in &vertices {
        if let Some(i) = (0..n).find(|&i| cnf.assignment.value(&reductions::position_var(v, i)) == Some(true)) {
            path[i] = Some(v);
        }
    }

    let rendered: Vec<String> = path.into_iter().map(|v| v.map(|v| v.to_string()).unwrap_or_else(|| "?".into())).collect();
    format!("Path: {}", rendered.join(" -> "))
}

/// Parses `"{prefix}{n}{suffix}"` and returns `n`, or `None` if the name
/// doesn't match that shape.
fn parse_prefixed(name: &str, prefix: &str, suffix: &str) -> Option<usize> {
    let rest = name.strip_prefix(prefix)?;
    let rest = rest.strip_suffix(suffix)?;
    rest.parse().ok()
}

/// Parses `"{prefix}{a}{mid}{b}"` and returns `(a, b)`.
fn parse_pair(name: &str, prefix: &str, mid: &str) -> Option<(usize, usize)> {
    let rest = name.strip_prefix(prefix)?;
    let (a, b) = rest.split_once(mid)?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sat_core::{Clause, Literal};

    #[test]
    fn numeric_names_sort_numerically() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([
            Literal::pos(VarName::from("10")),
            Literal::pos(VarName::from("2")),
        ])]);
        cnf.assign(&VarName::from("10"), true);
        cnf.assign(&VarName::from("2"), false);
        assert_eq!(format_model(&cnf), "2: false\n10: true");
    }

    #[test]
    fn symbolic_names_sort_lexicographically() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([
            Literal::pos(VarName::from("bob")),
            Literal::pos(VarName::from("alice")),
        ])]);
        cnf.assign(&VarName::from("bob"), true);
        cnf.assign(&VarName::from("alice"), true);
        assert_eq!(format_model(&cnf), "alice: true\nbob: true");
    }

    #[test]
    fn independent_set_report_lists_members() {
        let mut cnf = Cnf::new(vec![Clause::from_iter([Literal::pos(reductions::independent_set_var(0))])]);
        cnf.assign(&reductions::independent_set_var(0), true);
        assert_eq!(format_independent_set(&cnf), "Independent set: {0}");
    }
}
