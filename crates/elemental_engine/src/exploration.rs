//! Single-hero exploration variant.
//!
//! A hero starts in the centre of an elemental world and expands by
//! exploring neighbouring tiles: defeating corner guardians, collecting
//! treasure and claiming land until they hold 60% of the world.

use crate::error::{BoundsError, ConfigError, ConfigErrorKind};
use crate::position::Coord;
use crate::rng::RandomSource;
use crate::Element;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default world side length.
pub const EXPLORATION_SIZE: usize = 8;
/// Army on the hero's starting tile.
pub const HERO_START_ARMY: u32 = 5;
/// Army left on a tile won from a guardian.
pub const GUARDIAN_CAPTURE_ARMY: u32 = 3;
/// Experience for defeating a guardian.
pub const GUARDIAN_EXPERIENCE: u32 = 50;
/// Experience per hero level.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;
/// Mana spent by the hero's elemental ability.
pub const ABILITY_MANA_COST: u32 = 15;

const TREASURE_CHANCE: f64 = 0.15;
const SHRINE_CHANCE: f64 = 0.1;
const SECRET_CHANCE: f64 = 0.05;
const ITEM_CHANCE: f64 = 0.7;

/// What kind of place a tile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TileKind {
    /// Plain land.
    Normal,
    /// Guarded corner.
    Guardian,
    /// May hold an item.
    Treasure,
    /// Elemental shrine.
    Shrine,
    /// Hidden place.
    Secret,
}

/// An item the hero can carry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Item {
    /// Display name.
    name: String,
    /// Realm the item came from.
    element: Element,
    /// Item strength.
    power: u32,
}

impl Item {
    /// The relic found in treasure tiles of `element`'s realm.
    pub fn relic(element: Element) -> Self {
        Self {
            name: "Ancient Relic".to_string(),
            element,
            power: 10,
        }
    }
}

/// A corner guardian.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Guardian {
    /// Display name.
    name: String,
    /// Realm it guards.
    element: Element,
    /// Current health.
    health: u32,
    /// Full health.
    max_health: u32,
    /// Attack strength.
    attack: u32,
    /// Defence strength.
    defense: u32,
    /// Whether the hero has beaten it.
    defeated: bool,
}

impl Guardian {
    /// The guardian of `element`'s realm.
    pub fn of(element: Element) -> Self {
        let name = match element {
            Element::Fire => "Lava Titan",
            Element::Water => "Tidal Colossus",
            Element::Earth => "Stone Golem",
            Element::Wind => "Storm Dragon",
        };
        Self {
            name: name.to_string(),
            element,
            health: 100,
            max_health: 100,
            attack: 25,
            defense: 15,
            defeated: false,
        }
    }
}

/// One tile of the world.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Tile {
    /// Position in the world.
    coord: Coord,
    /// Elemental quadrant.
    realm: Element,
    /// Kind of place.
    kind: TileKind,
    /// Held by the hero.
    owned: bool,
    /// Garrison size.
    army: u32,
    /// Visited by the hero.
    explored: bool,
    /// Item waiting to be found.
    treasure: Option<Item>,
    /// Corner guardian.
    guardian: Option<Guardian>,
}

/// The exploring hero.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Hero {
    /// Hero's element.
    element: Element,
    /// Level, starting at one.
    level: u32,
    /// Current health.
    health: u32,
    /// Full health.
    max_health: u32,
    /// Current mana.
    mana: u32,
    /// Full mana.
    max_mana: u32,
    /// Total experience.
    experience: u32,
    /// Collected items.
    items: Vec<Item>,
    /// Tile the hero stands on.
    position: Coord,
}

impl Hero {
    /// A level-one hero standing at `position`.
    pub fn new(element: Element, position: Coord) -> Self {
        Self {
            element,
            level: 1,
            health: 100,
            max_health: 100,
            mana: 50,
            max_mana: 50,
            experience: 0,
            items: Vec::new(),
            position,
        }
    }

    /// Adds experience and returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let level = 1 + self.experience / EXPERIENCE_PER_LEVEL;
        let gained = level.saturating_sub(self.level);
        self.level = level;
        gained
    }
}

/// What exploring a tile produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discovery {
    /// A guardian fell; its tile is now the hero's.
    GuardianDefeated {
        /// Guardian name.
        name: String,
        /// Hero levels gained from the fight.
        levels_gained: u32,
    },
    /// The hero picked up an item.
    TreasureFound(Item),
    /// An unowned tile was claimed.
    Claimed,
    /// The tile already belonged to the hero.
    AlreadyOwned,
}

/// A rejected exploration command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ExploreError {
    /// The world is already conquered.
    #[display("The world is already conquered")]
    Finished,
    /// The tile is not next to the hero or the hero's land.
    #[display("Tile {} is out of the hero's reach", _0)]
    OutOfReach(Coord),
    /// Not enough mana for the ability.
    #[display("Ability needs {} mana, hero has {}", cost, mana)]
    InsufficientMana {
        /// Mana required.
        cost: u32,
        /// Mana available.
        mana: u32,
    },
    /// A coordinate fell off the world.
    #[display("{}", _0)]
    Bounds(BoundsError),
}

impl std::error::Error for ExploreError {}

impl From<BoundsError> for ExploreError {
    fn from(err: BoundsError) -> Self {
        ExploreError::Bounds(err)
    }
}

/// The exploration world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    size: usize,
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
    hero: Hero,
}

impl World {
    /// Generates a `size × size` world for a hero of `element`.
    ///
    /// Corners hold guardians, the centre is the hero's owned starting tile,
    /// and every other tile rolls its kind: treasure, then shrine, then
    /// secret, else normal. Treasure tiles then roll for an item.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero size.
    #[instrument(skip(rng))]
    pub fn generate(size: usize, element: Element, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::new(ConfigErrorKind::GridSize(size)));
        }
        let start = Coord::new(size / 2, size / 2);
        let last = size - 1;

        let mut tiles = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let coord = Coord::new(x, y);
                let realm = realm_for(coord, size);
                let is_start = coord == start;
                let is_corner = (x == 0 || x == last) && (y == 0 || y == last);
                let kind = if is_start {
                    TileKind::Normal
                } else if is_corner {
                    TileKind::Guardian
                } else {
                    roll_kind(rng)
                };
                tiles.push(Tile {
                    coord,
                    realm,
                    kind,
                    owned: is_start,
                    army: if is_start { HERO_START_ARMY } else { 0 },
                    explored: is_start,
                    treasure: None,
                    guardian: (kind == TileKind::Guardian).then(|| Guardian::of(realm)),
                });
            }
        }

        for tile in tiles.iter_mut().filter(|t| t.kind == TileKind::Treasure) {
            if rng.chance(ITEM_CHANCE) {
                tile.treasure = Some(Item::relic(tile.realm));
            }
        }

        info!(size, %element, "Exploration world generated");
        Ok(Self {
            size,
            tiles,
            hero: Hero::new(element, start),
        })
    }

    /// Side length of the world.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The hero.
    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(&self, coord: Coord) -> Result<usize, BoundsError> {
        if coord.x < self.size && coord.y < self.size {
            Ok(coord.y * self.size + coord.x)
        } else {
            Err(BoundsError::new(coord.to_string(), self.size))
        }
    }

    /// Tile at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the coordinate is off the world.
    pub fn tile(&self, coord: Coord) -> Result<&Tile, BoundsError> {
        let index = self.index(coord)?;
        Ok(&self.tiles[index])
    }

    /// Tiles owned by the hero.
    pub fn owned_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.owned).count()
    }

    /// Tiles needed for victory: 60% of the world, rounded up.
    pub fn victory_threshold(&self) -> usize {
        (self.tiles.len() * 3).div_ceil(5)
    }

    /// True once the hero owns the victory threshold.
    pub fn is_won(&self) -> bool {
        self.owned_count() >= self.victory_threshold()
    }

    /// Whether the hero may explore `coord`.
    pub fn can_reach(&self, coord: Coord) -> bool {
        let Ok(tile) = self.tile(coord) else {
            return false;
        };
        if tile.owned {
            return true;
        }
        coord
            .surrounding(self.size)
            .into_iter()
            .any(|n| n == self.hero.position || self.tile(n).is_ok_and(|t| t.owned))
    }

    /// Explores `coord`, resolving whatever is there, and moves the hero
    /// onto it.
    ///
    /// # Errors
    ///
    /// [`ExploreError::Finished`] after victory, [`ExploreError::OutOfReach`]
    /// for a tile not next to the hero or the hero's land.
    #[instrument(skip(self))]
    pub fn explore(&mut self, coord: Coord) -> Result<Discovery, ExploreError> {
        if self.is_won() {
            return Err(ExploreError::Finished);
        }
        let index = self.index(coord)?;
        if !self.can_reach(coord) {
            warn!(%coord, "Tile out of reach");
            return Err(ExploreError::OutOfReach(coord));
        }

        let tile = &mut self.tiles[index];
        let discovery = match tile.guardian.as_mut() {
            Some(guardian) if !guardian.defeated => {
                guardian.defeated = true;
                tile.owned = true;
                tile.army = GUARDIAN_CAPTURE_ARMY;
                tile.explored = true;
                let name = guardian.name.clone();
                let levels_gained = self.hero.gain_experience(GUARDIAN_EXPERIENCE);
                info!(%coord, guardian = %name, levels_gained, "Guardian defeated");
                Discovery::GuardianDefeated { name, levels_gained }
            }
            _ => match tile.treasure.clone() {
                Some(item) if !tile.explored => {
                    tile.explored = true;
                    self.hero.items.push(item.clone());
                    info!(%coord, item = %item.name, "Treasure found");
                    Discovery::TreasureFound(item)
                }
                _ if !tile.owned => {
                    tile.owned = true;
                    tile.army = tile.army.max(1);
                    tile.explored = true;
                    debug!(%coord, "Tile claimed");
                    Discovery::Claimed
                }
                _ => Discovery::AlreadyOwned,
            },
        };

        self.hero.position = coord;
        if self.is_won() {
            info!(owned = self.owned_count(), "World conquered");
        }
        Ok(discovery)
    }

    /// Spends mana on the hero's elemental ability and returns what is left.
    ///
    /// # Errors
    ///
    /// [`ExploreError::InsufficientMana`] below the ability cost.
    #[instrument(skip(self))]
    pub fn use_ability(&mut self) -> Result<u32, ExploreError> {
        let mana = self.hero.mana;
        if mana < ABILITY_MANA_COST {
            return Err(ExploreError::InsufficientMana {
                cost: ABILITY_MANA_COST,
                mana,
            });
        }
        self.hero.mana = mana - ABILITY_MANA_COST;
        debug!(element = %self.hero.element, mana = self.hero.mana, "Ability used");
        Ok(self.hero.mana)
    }
}

/// Quadrant realm: fire top-left, water top-right, earth bottom-left, wind
/// bottom-right.
fn realm_for(coord: Coord, size: usize) -> Element {
    let left = 2 * coord.x < size;
    let top = 2 * coord.y < size;
    match (left, top) {
        (true, true) => Element::Fire,
        (false, true) => Element::Water,
        (true, false) => Element::Earth,
        (false, false) => Element::Wind,
    }
}

fn roll_kind(rng: &mut dyn RandomSource) -> TileKind {
    if rng.chance(TREASURE_CHANCE) {
        TileKind::Treasure
    } else if rng.chance(SHRINE_CHANCE) {
        TileKind::Shrine
    } else if rng.chance(SECRET_CHANCE) {
        TileKind::Secret
    } else {
        TileKind::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;

    fn plain_world() -> World {
        World::generate(EXPLORATION_SIZE, Element::Fire, &mut FixedSequence::constant(0.99)).unwrap()
    }

    #[test]
    fn test_layout() {
        let world = plain_world();
        let start = world.tile(Coord::new(4, 4)).unwrap();
        assert!(*start.owned());
        assert_eq!(*start.army(), HERO_START_ARMY);
        assert_eq!(*start.realm(), Element::Wind);
        assert_eq!(*world.tile(Coord::new(0, 0)).unwrap().realm(), Element::Fire);
        assert_eq!(*world.tile(Coord::new(7, 0)).unwrap().realm(), Element::Water);
        assert_eq!(*world.tile(Coord::new(0, 7)).unwrap().realm(), Element::Earth);

        let corner = world.tile(Coord::new(7, 7)).unwrap();
        assert_eq!(*corner.kind(), TileKind::Guardian);
        assert_eq!(corner.guardian().as_ref().map(|g| g.name().as_str()), Some("Storm Dragon"));
        assert_eq!(world.victory_threshold(), 39);
    }

    #[test]
    fn test_low_rolls_make_treasure() {
        let world = World::generate(4, Element::Water, &mut FixedSequence::constant(0.0)).unwrap();
        let tile = world.tile(Coord::new(1, 0)).unwrap();
        assert_eq!(*tile.kind(), TileKind::Treasure);
        assert!(tile.treasure().is_some());
    }

    #[test]
    fn test_reach_grows_with_land() {
        let mut world = plain_world();
        assert!(!world.can_reach(Coord::new(6, 4)));
        world.explore(Coord::new(5, 4)).unwrap();
        assert!(world.can_reach(Coord::new(6, 4)));
        assert_eq!(
            world.explore(Coord::new(1, 1)),
            Err(ExploreError::OutOfReach(Coord::new(1, 1)))
        );
    }

    #[test]
    fn test_experience_levels() {
        let mut hero = Hero::new(Element::Earth, Coord::new(0, 0));
        assert_eq!(hero.gain_experience(50), 0);
        assert_eq!(hero.gain_experience(60), 1);
        assert_eq!(*hero.level(), 2);
    }

    #[test]
    fn test_ability_spends_mana() {
        let mut world = plain_world();
        assert_eq!(world.use_ability().unwrap(), 35);
        world.use_ability().unwrap();
        world.use_ability().unwrap();
        assert_eq!(
            world.use_ability(),
            Err(ExploreError::InsufficientMana { cost: 15, mana: 5 })
        );
    }
}
