use async_trait::async_trait;
use lp_tracker_core::{Division, Error, Ladder, ParseRankError, Rank, RankedEntry, Tier};
use riven::consts::{PlatformRoute, QueueType};
use riven::models::league_v4::LeagueEntry;
use riven::RiotApi;
use tracing::debug;

/// [`Ladder`] backed by the Riot API. Entities are identified by their
/// encrypted summoner ID on `route`.
pub struct RiotLadder {
    riot_api: RiotApi,
    route: PlatformRoute,
}

impl std::fmt::Debug for RiotLadder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiotLadder")
            .field("route", &self.route)
            .finish()
    }
}

impl RiotLadder {
    pub fn new(riot_api: RiotApi, route: PlatformRoute) -> Self {
        Self { riot_api, route }
    }
}

fn upstream(e: riven::RiotApiError) -> Error {
    Error::UpstreamUnavailable(e.to_string())
}

#[async_trait]
impl Ladder for RiotLadder {
    async fn resolve(&self, name: &str, tag: &str) -> Result<String, Error> {
        let account = self
            .riot_api
            .account_v1()
            .get_by_riot_id(self.route.to_regional(), name, tag)
            .await
            .map_err(upstream)?
            .ok_or_else(|| Error::AccountNotFound(format!("{name}#{tag}")))?;
        debug!("Resolved {name}#{tag} to PUUID {}", account.puuid);

        let summoner = self
            .riot_api
            .summoner_v4()
            .get_by_puuid(self.route, &account.puuid)
            .await
            .map_err(upstream)?;
        Ok(summoner.id)
    }

    async fn ranked_entry(&self, external_id: &str) -> Result<RankedEntry, Error> {
        let entries = self
            .riot_api
            .league_v4()
            .get_league_entries_for_summoner(self.route, external_id)
            .await
            .map_err(upstream)?;
        let entry = entries
            .iter()
            .find(|entry| entry.queue_type == QueueType::RANKED_SOLO_5x5)
            .ok_or_else(|| {
                Error::UpstreamUnavailable(format!("{external_id} has no solo queue entry"))
            })?;
        to_ranked_entry(entry)
    }
}

fn to_ranked_entry(entry: &LeagueEntry) -> Result<RankedEntry, Error> {
    let tier = entry
        .tier
        .ok_or_else(|| Error::UpstreamUnavailable("entry has no tier".into()))?;
    let division = entry.rank.map(|division| division.to_string());
    ranked_entry_from_labels(
        &tier.to_string(),
        division.as_deref(),
        entry.league_points,
        entry.wins,
        entry.losses,
    )
}

/// Build a [`RankedEntry`] from the labels and counters the API reports.
fn ranked_entry_from_labels(
    tier: &str,
    division: Option<&str>,
    league_points: i32,
    wins: i32,
    losses: i32,
) -> Result<RankedEntry, Error> {
    let tier = Tier::from_api_label(tier);
    let division = match division {
        Some(division) => division
            .parse()
            .map_err(|e: ParseRankError| Error::UpstreamUnavailable(e.to_string()))?,
        None if tier.is_apex() => Division::I,
        None => return Err(Error::UpstreamUnavailable("entry has no division".into())),
    };
    let count = |value: i32, what: &str| {
        u32::try_from(value)
            .map_err(|_| Error::UpstreamUnavailable(format!("negative {what}: {value}")))
    };

    Ok(RankedEntry {
        rank: Rank::new(tier, division, count(league_points, "league points")?),
        wins: count(wins, "wins")?,
        losses: count(losses, "losses")?,
    })
}
