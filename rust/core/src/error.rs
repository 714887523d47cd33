// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for SXF parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during SXF parsing.
///
/// Malformed file content is never an error: unparseable lines are skipped
/// and records with bad numeric fields are dropped record-by-record. The
/// variants here cover caller-side precondition violations only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input buffer")]
    EmptyInput,
}
