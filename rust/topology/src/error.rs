// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for floor-plan records.
//!
//! Validation and repair never fail; only decoding a record into the typed
//! [`FloorPlan`](crate::record::FloorPlan) can.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding floor-plan records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record does not match the floor-plan shape.
    #[error("floor plan record could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
