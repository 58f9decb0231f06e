use crate::notify::{Colour, Notification};
use crate::rank::{LpScalar, Rank};
use indoc::formatdoc;

/// Outcome of comparing one entity's previous observation with a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: String,
    pub previous: Option<Rank>,
    pub current: Rank,
    pub previous_scalar: Option<LpScalar>,
    pub current_scalar: LpScalar,
    /// `None` on the first observation.
    pub delta: Option<i64>,
    pub tier_changed: bool,
    /// `None` when no games have been played.
    pub win_rate: Option<f64>,
    pub message: String,
}

impl ChangeEvent {
    pub fn is_first_observation(&self) -> bool {
        self.previous.is_none()
    }

    /// Render the event as the message posted to the notification channel.
    pub fn to_notification(&self) -> Notification {
        let colour = match self.delta {
            None => Colour::FIRST_RECORD,
            Some(delta) if delta >= 0 => Colour::GAIN,
            Some(_) => Colour::LOSS,
        };
        let win_rate = match self.win_rate {
            Some(rate) => format!("{rate}%"),
            None => "n/a".to_string(),
        };
        let body = formatdoc! {"
            {message}
            Winrate: {win_rate}",
            message = self.message,
        };

        Notification {
            title: format!("{}'s LP Update", self.name),
            body,
            colour,
            image_key: Some(self.current.tier().image_key()),
        }
    }
}

/// Percentage of games won, rounded to two decimals. Returns `None` when no
/// games have been played.
pub fn win_rate(wins: u32, losses: u32) -> Option<f64> {
    let games = u64::from(wins) + u64::from(losses);
    if games == 0 {
        return None;
    }
    let percent = wins as f64 / games as f64 * 100.0;
    Some((percent * 100.0).round() / 100.0)
}

/// Compare the stored rank of `name` with the freshly fetched one.
pub fn evaluate(
    name: &str,
    previous: Option<&Rank>,
    current: Rank,
    wins: u32,
    losses: u32,
) -> ChangeEvent {
    let current_scalar = current.scalar();
    let win_rate = win_rate(wins, losses);

    let Some(previous) = previous.copied() else {
        return ChangeEvent {
            name: name.to_string(),
            previous: None,
            current,
            previous_scalar: None,
            current_scalar,
            delta: None,
            tier_changed: false,
            win_rate,
            message: format!("This is the first record for {name}. Current rank: {current}."),
        };
    };

    let previous_scalar = previous.scalar();
    let delta = current_scalar.delta_from(previous_scalar);
    let tier_changed = !previous.same_division(&current);

    let mut message = if delta >= 0 {
        format!("{name} gained {delta} LP.")
    } else {
        format!("{name} lost {} LP.", delta.unsigned_abs())
    };
    if tier_changed {
        message += &format!(
            " Rank changed from {} to {}.",
            previous.label(),
            current.label()
        );
    }
    message += &format!(" Current rank: {current}.");

    ChangeEvent {
        name: name.to_string(),
        previous: Some(previous),
        current,
        previous_scalar: Some(previous_scalar),
        current_scalar,
        delta: Some(delta),
        tier_changed,
        win_rate,
        message,
    }
}
