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

//! Terminal and JSON presentation of exchange outcomes.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use console::style;
use serde::Serialize;

use crate::exchange::Assignments;
use crate::roster::Roster;

/// One resolved pairing in reportable form
#[derive(Debug, Clone, Serialize)]
pub struct Pairing {
    pub giftor: String,
    pub recipient: String,
    pub recipient_name: String,
}

/// Machine-readable outcome document for `--json`
#[derive(Debug, Serialize)]
pub struct ExchangeReport {
    pub solved: bool,
    pub pairings: Vec<Pairing>,
}

impl ExchangeReport {
    /// Build a report from a complete assignment
    pub fn solved(roster: &Roster, assignments: &Assignments) -> Self {
        Self {
            solved: true,
            pairings: pairings(roster, assignments),
        }
    }

    /// The "no solution" outcome
    pub fn unsolved() -> Self {
        Self {
            solved: false,
            pairings: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Resolve roster positions back to emails and display names
fn pairings(roster: &Roster, assignments: &Assignments) -> Vec<Pairing> {
    assignments
        .iter()
        .filter_map(|(giftor, recipient)| {
            let giftor = roster.get(giftor)?;
            let recipient = roster.get(recipient)?;
            Some(Pairing {
                giftor: giftor.email.clone(),
                recipient: recipient.email.clone(),
                recipient_name: recipient.full_name(),
            })
        })
        .collect()
}

/// Print one notification line per giftor
pub fn print_notifications(roster: &Roster, assignments: &Assignments) {
    for pairing in pairings(roster, assignments) {
        println!(
            "Notifying {} that they are assigned to get a gift for {}",
            style(&pairing.giftor).cyan(),
            style(&pairing.recipient_name).green()
        );
    }
}

/// Print the assignment summary table
pub fn print_summary_table(roster: &Roster, assignments: &Assignments) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["giftor", "recipient", "recipient email"]);

    for pairing in pairings(roster, assignments) {
        table.add_row(vec![
            &pairing.giftor,
            &pairing.recipient_name,
            &pairing.recipient,
        ]);
    }

    println!("{}", table);
}
