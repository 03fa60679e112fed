// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Acrostic — collaborative crossword session engine.
//!
//! Puzzle compilation, cursor navigation, the shared action log, and a
//! room-scoped websocket relay, in a single-crate layout.

pub mod client;
pub mod model;
pub mod nav;
pub mod ops;
pub mod puzzle;
pub mod relay;
pub mod store;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
