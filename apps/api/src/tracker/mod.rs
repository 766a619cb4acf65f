// User state: saved jobs, preferences, per-day digest snapshots.
// All of it lives in one Tracker and is written through to the KvStore.

pub mod handlers;
pub mod session;

pub use session::{DigestState, Tracker};
