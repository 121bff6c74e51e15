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

//! Candidate recipient graph construction.

use crate::roster::{Exclusion, Roster};

/// Per-giftor legal recipient lists, fixed at build time.
///
/// The solver clones per-giftor working lists out of this graph and never
/// mutates it, so one graph can back any number of solve attempts.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    candidates: Vec<Vec<usize>>,
}

impl CandidateGraph {
    /// Build the graph from a roster and an exclusion list.
    ///
    /// Each giftor may give to everyone except themselves, minus any
    /// excluded recipients. Exclusions naming an email outside the roster
    /// are ignored. Candidate lists keep roster order, so seeded runs are
    /// reproducible.
    pub fn build(roster: &Roster, exclusions: &[Exclusion]) -> Self {
        let count = roster.len();
        let mut candidates: Vec<Vec<usize>> = (0..count)
            .map(|giftor| (0..count).filter(|&r| r != giftor).collect())
            .collect();

        for exclusion in exclusions {
            if let (Some(giftor), Some(recipient)) = (
                roster.index_of(&exclusion.giftor),
                roster.index_of(&exclusion.recipient),
            ) {
                candidates[giftor].retain(|&c| c != recipient);
            }
        }

        Self { candidates }
    }

    /// Number of participants covered by the graph
    pub fn participant_count(&self) -> usize {
        self.candidates.len()
    }

    /// Legal recipients for a giftor
    pub fn candidates(&self, giftor: usize) -> &[usize] {
        &self.candidates[giftor]
    }

    /// The giftor with the fewest legal recipients, earliest roster
    /// position on ties. Starting the search there surfaces
    /// over-constrained participants before any depth is wasted.
    pub fn most_constrained(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (giftor, options) in self.candidates.iter().enumerate() {
            if best.map_or(true, |b| options.len() < self.candidates[b].len()) {
                best = Some(giftor);
            }
        }
        best
    }
}
