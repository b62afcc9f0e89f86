//! Elemental factions and the rule modifiers each one grants.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Extra attacking army granted to wind movers.
pub const WIND_ATTACK_BONUS: u32 = 1;

/// Extra defending army granted to water territories.
pub const WATER_DEFENSE_BONUS: u32 = 1;

/// Per-tile reinforcement at the start of a water player's turn.
pub const WATER_REINFORCEMENT: u32 = 2;

/// Per-tile reinforcement for every other element.
pub const BASE_REINFORCEMENT: u32 = 1;

/// Chance that an earth territory regenerates into an empty neighbour.
pub const EARTH_REGEN_CHANCE: f64 = 0.3;

/// Elemental faction chosen by a player.
///
/// - Fire spreads into empty neighbours after a capture.
/// - Water fortifies: +1 defence and double reinforcement.
/// - Earth regenerates into empty neighbours at turn start.
/// - Wind extends reach and adds +1 to attacks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Element {
    /// Fire faction.
    Fire,
    /// Water faction.
    Water,
    /// Earth faction.
    Earth,
    /// Wind faction.
    Wind,
}

impl Element {
    /// Default element assignment by seat, used when a player does not pick one.
    pub const SEATS: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Wind];

    /// Bonus added to the attacking strength of a mover with this element.
    #[instrument]
    pub fn attack_bonus(self) -> u32 {
        match self {
            Element::Wind => WIND_ATTACK_BONUS,
            _ => 0,
        }
    }

    /// Bonus added to the defending strength of a territory tagged with this element.
    #[instrument]
    pub fn defense_bonus(self) -> u32 {
        match self {
            Element::Water => WATER_DEFENSE_BONUS,
            _ => 0,
        }
    }

    /// Armies added to every owned territory at the start of the owner's turn.
    #[instrument]
    pub fn reinforcement(self) -> u32 {
        match self {
            Element::Water => WATER_REINFORCEMENT,
            _ => BASE_REINFORCEMENT,
        }
    }

    /// Whether movers of this element use the extended (wind) reach.
    pub fn has_extended_reach(self) -> bool {
        self == Element::Wind
    }

    /// Whether captures by this element spread into empty neighbours.
    pub fn spreads_on_capture(self) -> bool {
        self == Element::Fire
    }

    /// Whether owned territories of this element regenerate at turn start.
    pub fn regenerates(self) -> bool {
        self == Element::Earth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_wind_attacks_harder() {
        for element in Element::iter() {
            let expected = if element == Element::Wind { 1 } else { 0 };
            assert_eq!(element.attack_bonus(), expected, "{element}");
        }
    }

    #[test]
    fn test_water_fortifies() {
        assert_eq!(Element::Water.defense_bonus(), 1);
        assert_eq!(Element::Water.reinforcement(), 2);
        assert_eq!(Element::Earth.reinforcement(), 1);
        assert_eq!(Element::Fire.defense_bonus(), 0);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Element::from_str("Fire").unwrap(), Element::Fire);
        assert_eq!(Element::from_str("wind").unwrap(), Element::Wind);
        assert!(Element::from_str("lightning").is_err());
        assert_eq!(Element::Earth.to_string(), "earth");
    }
}
