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

//! Participant roster and exclusion list loading.
//!
//! Both input files are CSV with fixed header rows:
//! participants are `First Name,Last Name,Email Address`, exclusions are
//! `Secret Giftor,Recipient`. Anything else is rejected at the boundary;
//! the exchange core never sees malformed data.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::warn;

use crate::error::{GiftexError, GiftexResult};

/// Expected header row of a participant file
pub const PARTICIPANT_HEADERS: [&str; 3] = ["First Name", "Last Name", "Email Address"];

/// Expected header row of an exclusion file
pub const EXCLUSION_HEADERS: [&str; 2] = ["Secret Giftor", "Recipient"];

/// A single gift exchange participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Unique key within a run
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Participant {
    pub fn new(email: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// Display name used in reports; the algorithm only ever sees the email
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Ordered participant set keyed by email
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Create a new empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a participant, keeping file order.
    ///
    /// A duplicate email replaces the earlier entry in place, so the last
    /// row of the file wins while the participant keeps its original
    /// position.
    pub fn insert(&mut self, participant: Participant) {
        match self.index.get(&participant.email) {
            Some(&pos) => {
                warn!(email = %participant.email, "duplicate roster entry replaces earlier row");
                self.participants[pos] = participant;
            }
            None => {
                self.index
                    .insert(participant.email.clone(), self.participants.len());
                self.participants.push(participant);
            }
        }
    }

    /// Get a participant by roster position
    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.participants.get(position)
    }

    /// Get the roster position of an email, if present
    pub fn index_of(&self, email: &str) -> Option<usize> {
        self.index.get(email).copied()
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check if the roster is empty
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate participants in roster order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }
}

/// Forbidden giftor/recipient pairing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub giftor: String,
    pub recipient: String,
}

impl Exclusion {
    pub fn new(giftor: &str, recipient: &str) -> Self {
        Self {
            giftor: giftor.to_string(),
            recipient: recipient.to_string(),
        }
    }
}

/// Load the participant roster from a CSV file
pub fn load_participants(path: &Path) -> GiftexResult<Roster> {
    let mut reader = open_csv(path, &PARTICIPANT_HEADERS)?;
    let mut roster = Roster::new();

    for record in reader.records() {
        let record = record.map_err(|e| GiftexError::csv(path.display().to_string(), e))?;
        if record.len() != PARTICIPANT_HEADERS.len() {
            return Err(GiftexError::invalid_format(
                path.display().to_string(),
                format!(
                    "expected {} fields per row, found {}",
                    PARTICIPANT_HEADERS.len(),
                    record.len()
                ),
            ));
        }
        roster.insert(Participant::new(&record[2], &record[0], &record[1]));
    }

    Ok(roster)
}

/// Load the exclusion list from a CSV file
pub fn load_exclusions(path: &Path) -> GiftexResult<Vec<Exclusion>> {
    let mut reader = open_csv(path, &EXCLUSION_HEADERS)?;
    let mut exclusions = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| GiftexError::csv(path.display().to_string(), e))?;
        if record.len() != EXCLUSION_HEADERS.len() {
            return Err(GiftexError::invalid_format(
                path.display().to_string(),
                format!(
                    "expected {} fields per row, found {}",
                    EXCLUSION_HEADERS.len(),
                    record.len()
                ),
            ));
        }
        exclusions.push(Exclusion::new(&record[0], &record[1]));
    }

    Ok(exclusions)
}

/// Open a CSV file and validate its header row against the expected one
fn open_csv(path: &Path, expected: &[&str]) -> GiftexResult<csv::Reader<File>> {
    let file = File::open(path)
        .map_err(|e| GiftexError::filesystem(path.display().to_string(), "failed to open", e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GiftexError::csv(path.display().to_string(), e))?;

    let matches = headers.len() == expected.len()
        && headers.iter().zip(expected.iter()).all(|(h, e)| h == *e);
    if !matches {
        return Err(GiftexError::invalid_format(
            path.display().to_string(),
            format!("expected header row '{}'", expected.join(",")),
        ));
    }

    Ok(reader)
}
