use crate::error::Error;
use crate::rank::Rank;
use async_trait::async_trait;

/// Ranked queue standing of one entity as reported by the ladder API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: Rank,
    pub wins: u32,
    pub losses: u32,
}

/// Ladder API collaborator. Any failure talking to the API is reported as
/// [`Error::UpstreamUnavailable`].
#[async_trait]
pub trait Ladder: Send + Sync {
    /// Resolve the opaque identifier used by [`Ladder::ranked_entry`] from a
    /// display name and tag line.
    async fn resolve(&self, name: &str, tag: &str) -> Result<String, Error>;

    /// Fetch the current ranked entry of an already resolved entity.
    async fn ranked_entry(&self, external_id: &str) -> Result<RankedEntry, Error>;
}
