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

//! Error types for boundary failures.
//!
//! An unsolvable exchange is not an error; the solver reports it as a
//! normal outcome. These types cover the input and configuration
//! boundary only.

use thiserror::Error;

/// Main error type for giftex operations
#[derive(Debug, Error)]
pub enum GiftexError {
    /// Malformed roster or exclusion file (wrong headers, wrong field count)
    #[error("Invalid format in '{path}': {reason}")]
    InvalidFormat { path: String, reason: String },

    /// Reader-level CSV failures
    #[error("Failed to parse '{path}'")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// File system errors
    #[error("File system error for '{path}': {message}")]
    FileSystem {
        path: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GiftexError {
    /// Create a format error for a malformed input file
    pub fn invalid_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GiftexError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a CSV parse error
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        GiftexError::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create a filesystem error
    pub fn filesystem<E: Into<std::io::Error>>(
        path: impl Into<String>,
        message: impl Into<String>,
        source: E,
    ) -> Self {
        GiftexError::FileSystem {
            path: path.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Result type alias for giftex operations
pub type GiftexResult<T> = std::result::Result<T, GiftexError>;
