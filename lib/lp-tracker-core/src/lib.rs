pub mod error;
pub mod evaluator;
pub mod ladder;
pub mod notify;
pub mod persist;
pub mod poll;
pub mod rank;
pub mod store;
pub mod tracker;

pub use error::Error;
pub use evaluator::{evaluate, win_rate, ChangeEvent};
pub use ladder::{Ladder, RankedEntry};
pub use notify::{ChannelRef, Colour, Notification, Notifier};
pub use persist::Persist;
pub use poll::{SweepOutcome, SweepReport};
pub use rank::{from_scalar, to_scalar, Division, LpScalar, ParseRankError, Rank, Tier};
pub use store::{TrackedEntity, TrackingStore};
pub use tracker::{AddOutcome, Tracker, TrackerState};
