use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Width of one (tier, division) entry on the linear scale.
pub const POINTS_PER_ENTRY: u32 = 100;

/// Number of tiers that are split into four divisions.
const DIVIDED_TIERS: u32 = 7;
const DIVISIONS_PER_TIER: u32 = 4;

/// Number of (tier, division) entries on the ladder.
pub const LADDER_LEN: u32 = DIVIDED_TIERS * DIVISIONS_PER_TIER + 3;
pub const MAX_INDEX: u32 = LADDER_LEN - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRankError {
    #[error("expected 4 tokens (tier, division, points, unit), got {0}")]
    TokenCount(usize),
    #[error("unknown tier {0:?}")]
    UnknownTier(String),
    #[error("unknown division {0:?}")]
    UnknownDivision(String),
    #[error("{0:?} is not a rank on the ladder")]
    UnknownRank(String),
    #[error("points {0:?} is not a non-negative integer")]
    InvalidPoints(String),
    #[error("expected unit \"LP\", got {0:?}")]
    InvalidUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];
    pub const MAX: Tier = Tier::Challenger;

    /// Apex tiers have a single division.
    pub fn is_apex(self) -> bool {
        self >= Tier::Master
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }

    /// Lowercase tier name, used to look up the tier's emblem.
    pub fn image_key(self) -> String {
        self.as_str().to_lowercase()
    }

    /// Interpret a tier label reported by the ladder API. Labels this crate
    /// does not know about are assumed to sit above the top of the ladder.
    pub fn from_api_label(label: &str) -> Tier {
        label.parse().unwrap_or_else(|_| {
            warn!("Unknown tier label {label:?}, clamping to {}", Tier::MAX);
            Tier::MAX
        })
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == upper)
            .ok_or_else(|| ParseRankError::UnknownTier(s.to_string()))
    }
}

/// Sub-rank within a tier. Declared lowest first so that the derived
/// ordering follows skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    IV,
    III,
    II,
    I,
}

impl Division {
    fn steps_from_bottom(self) -> u32 {
        match self {
            Division::IV => 0,
            Division::III => 1,
            Division::II => 2,
            Division::I => 3,
        }
    }

    fn from_steps(steps: u32) -> Division {
        match steps {
            0 => Division::IV,
            1 => Division::III,
            2 => Division::II,
            _ => Division::I,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Division::IV => "IV",
            Division::III => "III",
            Division::II => "II",
            Division::I => "I",
        }
    }
}

impl Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Division {
    type Err = ParseRankError;

    /// Accepts roman numerals as the ladder API reports them, or the plain
    /// numbers 1 to 4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "I" | "1" => Ok(Division::I),
            "II" | "2" => Ok(Division::II),
            "III" | "3" => Ok(Division::III),
            "IV" | "4" => Ok(Division::IV),
            _ => Err(ParseRankError::UnknownDivision(s.to_string())),
        }
    }
}

/// A position on the ranked ladder. The points are only meaningful relative
/// to the (tier, division) they were earned in; compare ranks through
/// [`LpScalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RankRecord", into = "RankRecord")]
pub struct Rank {
    tier: Tier,
    division: Division,
    points: u32,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RankRecord {
    tier: Tier,
    division: Division,
    points: u32,
}

impl From<RankRecord> for Rank {
    fn from(record: RankRecord) -> Self {
        Rank::new(record.tier, record.division, record.points)
    }
}

impl From<Rank> for RankRecord {
    fn from(rank: Rank) -> Self {
        RankRecord {
            tier: rank.tier,
            division: rank.division,
            points: rank.points,
        }
    }
}

impl Rank {
    /// Apex tiers ignore the supplied division and always sit in division I.
    pub fn new(tier: Tier, division: Division, points: u32) -> Self {
        let division = if tier.is_apex() {
            Division::I
        } else {
            division
        };
        Self {
            tier,
            division,
            points,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn division(&self) -> Division {
        self.division
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Position of this rank's (tier, division) on the ladder.
    pub fn index(&self) -> u32 {
        rank_index(self.tier, self.division)
    }

    pub fn scalar(&self) -> LpScalar {
        to_scalar(self)
    }

    /// Whether both ranks sit in the same tier and division, regardless of
    /// points.
    pub fn same_division(&self, other: &Rank) -> bool {
        self.tier == other.tier && self.division == other.division
    }

    /// Tier and division without points, e.g. `GOLD II`.
    pub fn label(&self) -> String {
        format!("{} {}", self.tier, self.division)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} LP", self.tier, self.division, self.points)
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    /// Parse text of the form `GOLD II 40 LP`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [tier, division, points, unit] = tokens.as_slice() else {
            return Err(ParseRankError::TokenCount(tokens.len()));
        };

        let tier: Tier = tier.parse()?;
        let division: Division = division.parse()?;
        if tier.is_apex() && division != Division::I {
            return Err(ParseRankError::UnknownRank(format!("{tier} {division}")));
        }
        let points = points
            .parse::<u32>()
            .map_err(|_| ParseRankError::InvalidPoints(points.to_string()))?;
        if !unit.eq_ignore_ascii_case("LP") {
            return Err(ParseRankError::InvalidUnit(unit.to_string()));
        }

        Ok(Rank::new(tier, division, points))
    }
}

/// Single integer that totally orders every [`Rank`]:
/// `index * 100 + points`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LpScalar(pub u32);

impl LpScalar {
    /// Signed difference `self - earlier`.
    pub fn delta_from(self, earlier: LpScalar) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }
}

impl Display for LpScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn rank_index(tier: Tier, division: Division) -> u32 {
    let index = if tier.is_apex() {
        DIVIDED_TIERS * DIVISIONS_PER_TIER + (tier as u32 - Tier::Master as u32)
    } else {
        tier as u32 * DIVISIONS_PER_TIER + division.steps_from_bottom()
    };
    index.min(MAX_INDEX)
}

fn entry_at(index: u32) -> (Tier, Division) {
    let index = index.min(MAX_INDEX);
    let apex_start = DIVIDED_TIERS * DIVISIONS_PER_TIER;
    if index >= apex_start {
        let tier = Tier::ALL[(Tier::Master as u32 + index - apex_start) as usize];
        (tier, Division::I)
    } else {
        let tier = Tier::ALL[(index / DIVISIONS_PER_TIER) as usize];
        (tier, Division::from_steps(index % DIVISIONS_PER_TIER))
    }
}

pub fn to_scalar(rank: &Rank) -> LpScalar {
    LpScalar((rank.index() * POINTS_PER_ENTRY).saturating_add(rank.points))
}

/// Decompose a scalar back into a [`Rank`]. Anything above the top entry
/// stays in the top entry with the excess kept as points.
pub fn from_scalar(scalar: LpScalar) -> Rank {
    let index = (scalar.0 / POINTS_PER_ENTRY).min(MAX_INDEX);
    let (tier, division) = entry_at(index);
    Rank::new(tier, division, scalar.0 - index * POINTS_PER_ENTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_entry() -> impl Iterator<Item = (Tier, Division)> {
        (0..LADDER_LEN).map(entry_at)
    }

    #[test]
    fn ladder_entries_are_distinct_and_ordered() {
        let indices: Vec<u32> = every_entry()
            .map(|(tier, division)| rank_index(tier, division))
            .collect();
        let expected: Vec<u32> = (0..LADDER_LEN).collect();
        assert_eq!(indices, expected);
        assert_eq!(entry_at(0), (Tier::Iron, Division::IV));
        assert_eq!(entry_at(MAX_INDEX), (Tier::Challenger, Division::I));
    }

    #[test]
    fn scalar_round_trips_below_one_hundred_points() {
        for (tier, division) in every_entry() {
            for points in [0, 1, 40, 99] {
                let rank = Rank::new(tier, division, points);
                assert_eq!(from_scalar(to_scalar(&rank)), rank, "{rank}");
            }
        }
    }

    #[test]
    fn scalar_increases_with_index_and_points() {
        let mut previous: Option<LpScalar> = None;
        for (tier, division) in every_entry() {
            let low = Rank::new(tier, division, 0).scalar();
            let high = Rank::new(tier, division, 99).scalar();
            assert!(high > low);
            if let Some(previous) = previous {
                assert!(low > previous);
            }
            previous = Some(high);
        }
    }

    #[test]
    fn known_scalars() {
        assert_eq!(Rank::new(Tier::Iron, Division::IV, 0).scalar(), LpScalar(0));
        assert_eq!(Rank::new(Tier::Gold, Division::II, 40).scalar(), LpScalar(1440));
        assert_eq!(Rank::new(Tier::Gold, Division::I, 10).scalar(), LpScalar(1510));
        assert_eq!(Rank::new(Tier::Diamond, Division::I, 99).scalar(), LpScalar(2799));
        assert_eq!(Rank::new(Tier::Master, Division::I, 0).scalar(), LpScalar(2800));
        assert_eq!(
            Rank::new(Tier::Challenger, Division::I, 0).scalar(),
            LpScalar(MAX_INDEX * 100)
        );
    }

    #[test]
    fn apex_division_is_normalized() {
        let rank = Rank::new(Tier::Grandmaster, Division::III, 12);
        assert_eq!(rank.division(), Division::I);
        assert_eq!(rank, Rank::new(Tier::Grandmaster, Division::I, 12));
    }

    #[test]
    fn scalars_above_the_ceiling_stay_in_the_top_entry() {
        let rank = from_scalar(LpScalar(MAX_INDEX * 100 + 1_234));
        assert_eq!(rank.tier(), Tier::Challenger);
        assert_eq!(rank.division(), Division::I);
        assert_eq!(rank.points(), 1_234);

        let challenger = Rank::new(Tier::Challenger, Division::I, 850);
        assert_eq!(from_scalar(challenger.scalar()), challenger);
    }

    #[test]
    fn unknown_api_tier_clamps_to_top() {
        assert_eq!(Tier::from_api_label("GOLD"), Tier::Gold);
        assert_eq!(Tier::from_api_label("SUPERCHALLENGER"), Tier::MAX);
    }

    #[test]
    fn parse_rank_text() {
        assert_eq!(
            "GOLD II 40 LP".parse::<Rank>(),
            Ok(Rank::new(Tier::Gold, Division::II, 40))
        );
        assert_eq!(
            "master i 310 lp".parse::<Rank>(),
            Ok(Rank::new(Tier::Master, Division::I, 310))
        );
        assert_eq!(
            "PLATINUM 4 0 LP".parse::<Rank>(),
            Ok(Rank::new(Tier::Platinum, Division::IV, 0))
        );
    }

    #[test]
    fn display_parses_back() {
        let rank = Rank::new(Tier::Emerald, Division::III, 77);
        assert_eq!(rank.to_string(), "EMERALD III 77 LP");
        assert_eq!(rank.to_string().parse::<Rank>(), Ok(rank));
    }

    #[test]
    fn parse_rank_text_errors() {
        assert_eq!(
            "GOLD II 40".parse::<Rank>(),
            Err(ParseRankError::TokenCount(3))
        );
        assert_eq!(
            "GOLD II 40 LP extra".parse::<Rank>(),
            Err(ParseRankError::TokenCount(5))
        );
        assert_eq!(
            "GOLD II forty LP".parse::<Rank>(),
            Err(ParseRankError::InvalidPoints("forty".into()))
        );
        assert_eq!(
            "GOLD II -5 LP".parse::<Rank>(),
            Err(ParseRankError::InvalidPoints("-5".into()))
        );
        assert_eq!(
            "WOOD II 40 LP".parse::<Rank>(),
            Err(ParseRankError::UnknownTier("WOOD".into()))
        );
        assert_eq!(
            "GOLD V 40 LP".parse::<Rank>(),
            Err(ParseRankError::UnknownDivision("V".into()))
        );
        assert_eq!(
            "MASTER II 40 LP".parse::<Rank>(),
            Err(ParseRankError::UnknownRank("MASTER II".into()))
        );
        assert_eq!(
            "GOLD II 40 XP".parse::<Rank>(),
            Err(ParseRankError::InvalidUnit("XP".into()))
        );
    }

    #[test]
    fn delta_is_signed() {
        let earlier = LpScalar(1510);
        let later = LpScalar(1440);
        assert_eq!(later.delta_from(earlier), -70);
        assert_eq!(earlier.delta_from(later), 70);
    }
}
