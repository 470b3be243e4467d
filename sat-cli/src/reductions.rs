//! Reductions from graph decision problems to CNF: pure, offline
//! clause-generating front ends that hand a `Cnf` to the core. None of
//! these touch `sat_core` internals — only the public `Cnf`/`Clause`/
//! `Literal` constructors.

use itertools::Itertools;

use sat_core::{Clause, Cnf, Literal, VarName};

/// An undirected graph: `num_vertices` vertices numbered `0..num_vertices`,
/// plus an edge list.
pub struct Graph {
    pub num_vertices: usize,
    pub edges: Vec<(usize, usize)>,
}

/// The minimal text format accepted on the CLI's graph input: a `n m`
/// header followed by `m` `u v` edge lines (0-indexed vertices).
pub fn parse_graph(input: &str) -> Result<Graph, sat_core::MalformedInput> {
    use sat_core::MalformedInput;

    let mut lines = input.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| MalformedInput::new(0, "missing graph header line"))?;
    let mut header_tokens = header.split_whitespace();
    let num_vertices: usize = header_tokens
        .next()
        .ok_or_else(|| MalformedInput::new(header_no + 1, "missing vertex count"))?
        .parse()
        .map_err(|_| MalformedInput::new(header_no + 1, "vertex count is not a number"))?;
    let num_edges: usize = header_tokens
        .next()
        .ok_or_else(|| MalformedInput::new(header_no + 1, "missing edge count"))?
        .parse()
        .map_err(|_| MalformedInput::new(header_no + 1, "edge count is not a number"))?;

    let mut edges = Vec::with_capacity(num_edges);
    for (line_no, line) in lines {
        let mut tokens = line.split_whitespace();
        let u: usize = tokens
            .next()
            .ok_or_else(|| MalformedInput::new(line_no + 1, "missing edge endpoint"))?
            .parse()
            .map_err(|_| MalformedInput::new(line_no + 1, "edge endpoint is not a number"))?;
        let v: usize = tokens
            .next()
            .ok_or_else(|| MalformedInput::new(line_no + 1, "missing edge endpoint"))?
            .parse()
            .map_err(|_| MalformedInput::new(line_no + 1, "edge endpoint is not a number"))?;
        edges.push((u, v));
    }

    if edges.len() != num_edges {
        return Err(MalformedInput::new(
            header_no + 1,
            format!("header declared {num_edges} edges but {} were read", edges.len()),
        ));
    }

    Ok(Graph { num_vertices, edges })
}

/// `v{v}` — true iff vertex `v` is in the independent set.
pub fn independent_set_var(v: usize) -> VarName {
    VarName::from(format!("v{v}").as_str())
}

/// `v{v}_c{c}` — true iff vertex `v` is colored `c`.
pub fn color_var(v: usize, c: usize) -> VarName {
    VarName::from(format!("v{v}_c{c}").as_str())
}

/// `v{v}_p{i}` — true iff vertex `v` occupies path position `i`.
pub fn position_var(v: usize, i: usize) -> VarName {
    VarName::from(format!("v{v}_p{i}").as_str())
}

/// An independent set of size at least `k`: no two chosen vertices are
/// adjacent, and at least `k` vertices are chosen.
///
/// The "at least k" constraint is encoded in the standard way: for every
/// subset of `n - k + 1` vertices, at least one is chosen (if fewer than
/// `k` were chosen, some such subset would contain none of them).
pub fn k_independent_set(graph: &Graph, k: usize) -> Cnf {
    let mut clauses = Vec::new();

    for &(u, v) in &graph.edges {
        clauses.push(Clause::from_iter([
            Literal::neg(independent_set_var(u)),
            Literal::neg(independent_set_var(v)),
        ]));
    }

    if k > 0 && k <= graph.num_vertices {
        let subset_size = graph.num_vertices - k + 1;
        for subset in (0..graph.num_vertices).combinations(subset_size) {
            clauses.push(Clause::from_iter(
                subset.into_iter().map(|v| Literal::pos(independent_set_var(v))),
            ));
        }
    }

    Cnf::new(clauses)
}

/// 3-colorability: every vertex gets exactly one of 3 colors, and no edge
/// connects two same-colored vertices.
pub fn three_colorable(graph: &Graph) -> Cnf {
    const COLORS: usize = 3;
    let mut clauses = Vec::new();

    for v in 0..graph.num_vertices {
        clauses.push(Clause::from_iter(
            (0..COLORS).map(|c| Literal::pos(color_var(v, c))),
        ));
        for (c1, c2) in (0..COLORS).tuple_combinations::<(_, _)>() {
            clauses.push(Clause::from_iter([
                Literal::neg(color_var(v, c1)),
                Literal::neg(color_var(v, c2)),
            ]));
        }
    }

    for &(u, v) in &graph.edges {
        for c in 0..COLORS {
            clauses.push(Clause::from_iter([Literal::neg(color_var(u, c)), Literal::neg(color_var(v, c))]));
        }
    }

    Cnf::new(clauses)
}

/// A Hamiltonian path: a permutation of the vertices onto `0..n` path
/// positions such that consecutive positions hold adjacent vertices.
pub fn hamiltonian_path(graph: &Graph) -> Cnf {
    let n = graph.num_vertices;
    let adjacent = |u: usize, v: usize| graph.edges.iter().any(|&(a, b)| (a, b) == (u, v) || (a, b) == (v, u));
    let mut clauses = Vec::new();

    for v in 0..n {
        clauses.push(Clause::from_iter((0..n).map(|i| Literal::pos(position_var(v, i)))));
        for (i1, i2) in (0..n).tuple_combinations::<(_, _)>() {
            clauses.push(Clause::from_iter([
                Literal::neg(position_var(v, i1)),
                Literal::neg(position_var(v, i2)),
            ]));
        }
    }

    for i in 0..n {
        clauses.push(Clause::from_iter((0..n).map(|v| Literal::pos(position_var(v, i)))));
        for (v1, v2) in (0..n).tuple_combinations::<(_, _)>() {
            clauses.push(Clause::from_iter([
                Literal::neg(position_var(v1, i)),
                Literal::neg(position_var(v2, i)),
            ]));
        }
    }

    for i in 0..n.saturating_sub(1) {
        for u in 0..n {
            for v in 0..n {
                if u != v && !adjacent(u, v) {
                    clauses.push(Clause::from_iter([
                        Literal::neg(position_var(u, i)),
                        Literal::neg(position_var(v, i + 1)),
                    ]));
                }
            }
        }
    }

    Cnf::new(clauses)
}
