//! The parallel search coordinator: a fixed pool of worker threads that
//! pull CNF instances from a shared queue, explore them with the same
//! rules as the sequential engine, and publish siblings created at branch
//! points back onto the queue for a peer to pick up.
//!
//! Cancellation is cooperative — workers only ever check a shared flag at
//! suspension points, never a forced abort, per `SPEC_FULL.md`'s "forced
//! thread termination" decision.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use std::thread;

use crate::cnf::{Cnf, VarName};
use crate::eval;
use crate::reduce;
use crate::sat_solution::SatResult;

struct Shared {
    queue: Mutex<VecDeque<Cnf>>,
    not_empty: Condvar,
    idle: AtomicUsize,
    cancel: AtomicBool,
    result: Mutex<Option<Cnf>>,
    workers: usize,
}

/// Runs the parallel coordinator over `cnf` using one worker thread per
/// logical CPU and returns the result. Agrees with `solve_sequential` on
/// the SAT/UNSAT tag for every input, though the two may return different
/// models.
pub fn solve_parallel(cnf: Cnf) -> SatResult {
    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    solve_parallel_with_workers(cnf, workers)
}

/// Like `solve_parallel`, but with an explicit worker count. Exposed so
/// tests can exercise the coordinator deterministically on small pools.
pub fn solve_parallel_with_workers(cnf: Cnf, workers: usize) -> SatResult {
    let workers = workers.max(1);
    let shared = std::sync::Arc::new(Shared {
        queue: Mutex::new(VecDeque::from([cnf])),
        not_empty: Condvar::new(),
        idle: AtomicUsize::new(workers),
        cancel: AtomicBool::new(false),
        result: Mutex::new(None),
        workers,
    });

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || worker_loop(&shared))
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    match shared.result.lock().expect("result mutex poisoned").take() {
        Some(model) => SatResult::Sat(model),
        None => SatResult::Unsat,
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let item = match dequeue(shared) {
            Some(item) => item,
            None => return, // cancel observed while waiting
        };

        match explore(item, shared) {
            SatResult::Sat(model) => {
                publish(shared, model);
                return;
            }
            SatResult::Unsat => {
                if became_terminator(shared) {
                    return;
                }
            }
        }
    }
}

/// Waits for work or cancellation. Returns `None` if the worker should
/// exit because cancellation was observed before any item was available.
fn dequeue(shared: &Shared) -> Option<Cnf> {
    let mut guard = shared.queue.lock().expect("queue mutex poisoned");
    while guard.is_empty() && !shared.cancel.load(Ordering::SeqCst) {
        guard = shared.not_empty.wait(guard).expect("queue mutex poisoned");
    }
    if shared.cancel.load(Ordering::SeqCst) {
        return None;
    }
    shared.idle.fetch_sub(1, Ordering::SeqCst);
    Some(guard.pop_front().expect("queue was just checked non-empty"))
}

/// Runs the DPLL rules over a single instance to a leaf (satisfied or
/// falsified), publishing every branch sibling to the shared queue instead
/// of a local stack — the parallel analogue of `dpll::solve_sequential`'s
/// explicit-stack loop.
fn explore(mut top: Cnf, shared: &Shared) -> SatResult {
    loop {
        if top.clauses.iter().all(|clause| eval::is_satisfied(clause, &top.assignment)) {
            top.complete();
            return SatResult::Sat(top);
        }
        if top.clauses.iter().any(|clause| eval::is_falsified(clause, &top.assignment)) {
            return SatResult::Unsat;
        }

        if let Some(lit) = reduce::unit_clause(&top) {
            top.satisfy(&lit);
            continue;
        }
        if let Some(lit) = reduce::pure_literal(&top) {
            top.satisfy(&lit);
            continue;
        }
        if let Some(name) = reduce::first_unassigned(&top) {
            publish_sibling(&top, &name, shared);
            top.assign(&name, false);
            continue;
        }

        return SatResult::Unsat;
    }
}

fn publish_sibling(top: &Cnf, var: &VarName, shared: &Shared) {
    let mut sibling = top.deep_clone();
    sibling.assign(var, true);
    shared.queue.lock().expect("queue mutex poisoned").push_back(sibling);
    shared.not_empty.notify_one();
}

/// Re-joins the idle count and checks whether every worker is now idle
/// with an empty queue. If so, this worker is the terminator: it raises
/// cancellation and wakes every waiter. The check is made while holding
/// the queue mutex so the `idle == workers && queue.is_empty()` snapshot
/// is never torn by a concurrent dequeue.
fn became_terminator(shared: &Shared) -> bool {
    shared.idle.fetch_add(1, Ordering::SeqCst);
    let guard = shared.queue.lock().expect("queue mutex poisoned");
    let idle = shared.idle.load(Ordering::SeqCst);
    if idle == shared.workers && guard.is_empty() {
        shared.cancel.store(true, Ordering::SeqCst);
        shared.not_empty.notify_all();
        true
    } else {
        false
    }
}

/// Installs `model` as the result exactly once; later SAT results lose the
/// race and are discarded. The winner raises cancellation and wakes every
/// waiter so idle workers observe it and exit.
fn publish(shared: &Shared, model: Cnf) {
    let mut guard = shared.result.lock().expect("result mutex poisoned");
    if guard.is_none() {
        *guard = Some(model);
        drop(guard);
        shared.cancel.store(true, Ordering::SeqCst);
        shared.not_empty.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{Clause, Literal};
    use crate::dpll::solve_sequential;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(VarName::from(name), polarity)
    }

    #[test]
    fn agrees_with_sequential_on_sat() {
        let build = || {
            Cnf::new(vec![
                Clause::from_iter([lit("1", false), lit("2", true), lit("3", true)]),
                Clause::from_iter([lit("2", true), lit("3", false)]),
            ])
        };
        assert_eq!(
            solve_sequential(build()).is_sat(),
            solve_parallel_with_workers(build(), 4).is_sat()
        );
    }

    #[test]
    fn agrees_with_sequential_on_unsat() {
        let build = || {
            Cnf::new(vec![
                Clause::from_iter([lit("1", true)]),
                Clause::from_iter([lit("1", false)]),
            ])
        };
        assert!(!solve_parallel_with_workers(build(), 4).is_sat());
        assert_eq!(
            solve_sequential(build()).is_sat(),
            solve_parallel_with_workers(build(), 4).is_sat()
        );
    }

    #[test]
    fn terminates_promptly_on_small_unsat_instance_with_many_workers() {
        // More workers than there is ever work for: most of them should
        // observe cancellation from the empty-queue wait path.
        let cnf = Cnf::new(vec![
            Clause::from_iter([lit("1", true)]),
            Clause::from_iter([lit("1", false)]),
        ]);
        let result = solve_parallel_with_workers(cnf, 8);
        assert!(result.is_unsat());
    }

    #[test]
    fn satisfying_model_assigns_every_variable_even_when_pure_literal_elimination_resolves_clauses_early() {
        let build = || {
            Cnf::new(vec![
                Clause::from_iter([lit("1", false), lit("2", true), lit("3", true)]),
                Clause::from_iter([lit("2", true), lit("3", false)]),
            ])
        };
        match solve_parallel_with_workers(build(), 1) {
            SatResult::Sat(model) => {
                for name in ["1", "2", "3"] {
                    assert!(
                        model.assignment.is_assigned(&VarName::from(name)),
                        "variable {name} missing from returned model"
                    );
                }
            }
            SatResult::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn single_worker_matches_sequential_exactly() {
        let build = || {
            Cnf::new(vec![
                Clause::from_iter([lit("1", true), lit("2", false)]),
                Clause::from_iter([lit("2", true), lit("3", true)]),
                Clause::from_iter([lit("3", false)]),
            ])
        };
        let seq = solve_sequential(build());
        let par = solve_parallel_with_workers(build(), 1);
        assert_eq!(seq.assignments(), par.assignments());
    }
}
