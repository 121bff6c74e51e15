/*
 * giftex - Secret gift exchange assignment generator.
 * Copyright (C) 2025  giftex contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Randomized backtracking search for a complete assignment.
//!
//! The search grows giftor -> recipient chains: after each commitment the
//! chosen recipient becomes the next giftor, until a chain closes into a
//! cycle and a fresh giftor is drawn from the participants still without
//! a gift. Every commitment pushes a frame holding the giftor's untried
//! candidates, so a dead end further down can resume exactly where that
//! giftor left off. Randomness only affects which valid assignment is
//! found and how quickly; exhaustion of the frame stack is proof that
//! none exists.

use rand::Rng;
use tracing::debug;

use super::{Assignments, CandidateGraph};

/// One backtracking frame: a giftor and the candidates not yet tried for
/// them at this point in the search.
#[derive(Debug)]
struct Frame {
    giftor: usize,
    remaining: Vec<usize>,
}

/// Backtracking search state over a candidate graph.
///
/// All bookkeeping lives here; the graph itself is never mutated. Each
/// solve consumes one solver, so independent attempts cannot share state.
pub struct ExchangeSolver<'a> {
    graph: &'a CandidateGraph,
    /// Committed recipient per giftor
    committed: Vec<Option<usize>>,
    /// Whether a giftor currently holds an entry in the assignment map
    giving: Vec<bool>,
    /// Receiver-used flags, cleared on backtrack
    received: Vec<bool>,
    received_count: usize,
    stack: Vec<Frame>,
}

impl<'a> ExchangeSolver<'a> {
    pub fn new(graph: &'a CandidateGraph) -> Self {
        let count = graph.participant_count();
        Self {
            graph,
            committed: vec![None; count],
            giving: vec![false; count],
            received: vec![false; count],
            received_count: 0,
            stack: Vec::with_capacity(count),
        }
    }

    /// Run the search to completion.
    ///
    /// Returns the complete assignment on success, or `None` once every
    /// assignment chain reachable under the constraints has been
    /// exhausted. `None` is a normal outcome, not an error. Identically
    /// seeded generators produce identical results.
    pub fn solve<R: Rng>(mut self, rng: &mut R) -> Option<Assignments> {
        let count = self.graph.participant_count();
        if count < 2 {
            return None;
        }

        let start = self.graph.most_constrained()?;
        self.giving[start] = true;
        self.stack.push(Frame {
            giftor: start,
            remaining: self.graph.candidates(start).to_vec(),
        });

        while let Some(frame) = self.stack.pop() {
            let mut giftor = frame.giftor;
            let mut remaining = frame.remaining;

            // Backtrack undo: drop the giftor from the assignment map and
            // release their committed recipient, if any.
            self.giving[giftor] = false;
            if let Some(recipient) = self.committed[giftor].take() {
                self.received[recipient] = false;
                self.received_count -= 1;
            }

            while !remaining.is_empty() {
                let pick = rng.random_range(0..remaining.len());
                let recipient = remaining.swap_remove(pick);

                // Re-push so this giftor's untried candidates survive a
                // failure further down the chain.
                self.stack.push(Frame { giftor, remaining });

                self.committed[giftor] = Some(recipient);
                self.giving[giftor] = true;
                self.received[recipient] = true;
                self.received_count += 1;

                if self.received_count == count {
                    return Some(Assignments::from_committed(self.committed));
                }

                giftor = if self.giving[recipient] {
                    // Chain closed into a cycle; restart from a
                    // participant whose recipient slot is still open.
                    self.pick_open_participant(rng)
                } else {
                    recipient
                };

                // Working copy of the next giftor's static candidates,
                // narrowed to recipients still without a gift.
                remaining = self
                    .graph
                    .candidates(giftor)
                    .iter()
                    .copied()
                    .filter(|&r| !self.received[r])
                    .collect();
            }
        }

        debug!("search space exhausted without a complete assignment");
        None
    }

    /// Uniform draw from the participants not yet chosen as a recipient
    fn pick_open_participant<R: Rng>(&self, rng: &mut R) -> usize {
        let open: Vec<usize> = (0..self.received.len())
            .filter(|&p| !self.received[p])
            .collect();
        open[rng.random_range(0..open.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Exclusion, Participant, Roster};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn roster_of(count: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..count {
            roster.insert(Participant::new(
                &format!("p{}@example.com", i),
                &format!("First{}", i),
                &format!("Last{}", i),
            ));
        }
        roster
    }

    fn exclude(giftor: usize, recipient: usize) -> Exclusion {
        Exclusion::new(
            &format!("p{}@example.com", giftor),
            &format!("p{}@example.com", recipient),
        )
    }

    fn assert_valid(assignments: &Assignments, count: usize, exclusions: &[(usize, usize)]) {
        assert_eq!(assignments.len(), count);

        let mut seen = HashSet::new();
        for (giftor, recipient) in assignments.iter() {
            assert_ne!(giftor, recipient, "self-assignment");
            assert!(recipient < count);
            assert!(seen.insert(recipient), "recipient used twice");
            assert!(
                !exclusions.contains(&(giftor, recipient)),
                "excluded pair ({}, {}) assigned",
                giftor,
                recipient
            );
        }
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn test_empty_roster_has_no_solution() {
        let graph = CandidateGraph::build(&roster_of(0), &[]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(ExchangeSolver::new(&graph).solve(&mut rng).is_none());
    }

    #[test]
    fn test_single_participant_has_no_solution() {
        let graph = CandidateGraph::build(&roster_of(1), &[]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(ExchangeSolver::new(&graph).solve(&mut rng).is_none());
    }

    #[test]
    fn test_two_participants_yield_the_unique_cycle() {
        let graph = CandidateGraph::build(&roster_of(2), &[]);

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let assignments = ExchangeSolver::new(&graph).solve(&mut rng).unwrap();
            assert_eq!(assignments.recipient_of(0), Some(1));
            assert_eq!(assignments.recipient_of(1), Some(0));
        }
    }

    #[test]
    fn test_assignment_is_a_derangement() {
        let graph = CandidateGraph::build(&roster_of(8), &[]);

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let assignments = ExchangeSolver::new(&graph).solve(&mut rng).unwrap();
            assert_valid(&assignments, 8, &[]);
        }
    }

    #[test]
    fn test_exclusions_are_honored() {
        let pairs = [(0, 1), (1, 2), (2, 3), (3, 0), (4, 0)];
        let exclusions: Vec<Exclusion> = pairs.iter().map(|&(g, r)| exclude(g, r)).collect();
        let graph = CandidateGraph::build(&roster_of(6), &exclusions);

        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let assignments = ExchangeSolver::new(&graph).solve(&mut rng).unwrap();
            assert_valid(&assignments, 6, &pairs);
        }
    }

    #[test]
    fn test_feasible_input_never_fails() {
        let exclusions = vec![exclude(0, 1), exclude(1, 0)];
        let graph = CandidateGraph::build(&roster_of(5), &exclusions);

        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert!(ExchangeSolver::new(&graph).solve(&mut rng).is_some());
        }
    }

    #[test]
    fn test_fully_forbidden_terminates_without_solution() {
        // Every edge removed: nobody can give to anybody.
        let mut exclusions = Vec::new();
        for giftor in 0..4 {
            for recipient in 0..4 {
                if giftor != recipient {
                    exclusions.push(exclude(giftor, recipient));
                }
            }
        }
        let graph = CandidateGraph::build(&roster_of(4), &exclusions);

        let mut rng = SmallRng::seed_from_u64(7);
        assert!(ExchangeSolver::new(&graph).solve(&mut rng).is_none());
    }

    #[test]
    fn test_single_emptied_candidate_list_is_unsolvable() {
        // p0 may give to nobody, so no bijection can exist; the solver
        // must prove that by exhaustion rather than crash.
        let exclusions = vec![exclude(0, 1), exclude(0, 2)];
        let graph = CandidateGraph::build(&roster_of(3), &exclusions);

        let mut rng = SmallRng::seed_from_u64(11);
        assert!(ExchangeSolver::new(&graph).solve(&mut rng).is_none());
    }

    #[test]
    fn test_forced_unique_solution_is_found() {
        // Constrain 4 participants down to the single rotation
        // 0->1->2->3->0 and check the solver lands on exactly that.
        let exclusions = vec![
            exclude(0, 2),
            exclude(0, 3),
            exclude(1, 0),
            exclude(1, 3),
            exclude(2, 0),
            exclude(2, 1),
            exclude(3, 1),
            exclude(3, 2),
        ];
        let graph = CandidateGraph::build(&roster_of(4), &exclusions);

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let assignments = ExchangeSolver::new(&graph).solve(&mut rng).unwrap();
            assert_eq!(assignments.recipient_of(0), Some(1));
            assert_eq!(assignments.recipient_of(1), Some(2));
            assert_eq!(assignments.recipient_of(2), Some(3));
            assert_eq!(assignments.recipient_of(3), Some(0));
        }
    }

    #[test]
    fn test_identical_seeds_produce_identical_assignments() {
        let exclusions = vec![exclude(2, 4), exclude(5, 1)];
        let graph = CandidateGraph::build(&roster_of(7), &exclusions);

        let mut first_rng = SmallRng::seed_from_u64(42);
        let mut second_rng = SmallRng::seed_from_u64(42);

        let first = ExchangeSolver::new(&graph).solve(&mut first_rng).unwrap();
        let second = ExchangeSolver::new(&graph).solve(&mut second_rng).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_graph_survives_solving() {
        // The solver works on cloned candidate lists; the graph must be
        // reusable for further attempts.
        let graph = CandidateGraph::build(&roster_of(5), &[]);
        let before: Vec<Vec<usize>> = (0..5).map(|g| graph.candidates(g).to_vec()).collect();

        let mut rng = SmallRng::seed_from_u64(3);
        let _ = ExchangeSolver::new(&graph).solve(&mut rng);

        let after: Vec<Vec<usize>> = (0..5).map(|g| graph.candidates(g).to_vec()).collect();
        assert_eq!(before, after);
    }
}
