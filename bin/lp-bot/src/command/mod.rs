use crate::notifier::DiscordNotifier;
use crate::riot_api::RiotLadder;
use crate::scheduler::FatalSender;
use lp_tracker_core::Tracker;
use lp_tracker_storage::JsonStorage;
use std::sync::Arc;
use std::time::Duration;

mod about;
mod add_summoner;
mod check_lp;
mod list;
mod remove_summoner;
mod set_channel;

pub use about::about;
pub use add_summoner::add_summoner;
pub use check_lp::check_lp;
pub use list::list;
pub use remove_summoner::remove_summoner;
pub use set_channel::set_channel;

pub type BotTracker = Tracker<RiotLadder, DiscordNotifier, JsonStorage>;

type CommandError = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub tracker: Arc<BotTracker>,
    pub poll_interval: Duration,
    pub fatal: FatalSender,
}
