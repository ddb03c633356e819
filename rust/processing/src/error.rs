// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the processing pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid pipeline configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Repaired record could not be decoded: {0}")]
    Topology(#[from] axoplan_topology::Error),
}
