// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Room-scoped realtime relay.
//!
//! The relay does not interpret gameplay beyond folding actions into the
//! stored game: clients mutate their own replicas and the relay fans the
//! actions out to everyone else in the room. Delivery is at-most-once from
//! the subscriber's perspective (a lagging receiver drops frames), ordered
//! per sender.

pub mod protocol;
pub mod room;
pub mod server;

pub use protocol::{ClientMessage, ServerMessage, SessionKey};
pub use room::{Envelope, RoomManager};
pub use server::{
    router, AuthError, IdentityProvider, PlayerIdentity, RelayState, TrustingIdentity,
};
