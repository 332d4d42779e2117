//! Roster module: Who is on the stage and what they are sending.
//!
//! - [`Participant`]: one member, with publish/subscribe state and streams
//! - [`Roster`]: ordered members with the local user pinned first
//! - [`RosterChange`]: the index-level change each mutation produces

mod participant;
#[allow(clippy::module_inception)]
mod roster;

pub use participant::{MediaKind, MediaKinds, Participant, PublishState, StreamInfo, SubscribeState};
pub use roster::{ChangeKind, Roster, RosterChange};
