//! Tests for the exploration variant.

use elemental_engine::{
    Coord, Discovery, Element, ExploreError, FixedSequence, GUARDIAN_CAPTURE_ARMY, TileKind, World,
};

fn plain_world() -> World {
    World::generate(8, Element::Earth, &mut FixedSequence::constant(0.99)).unwrap()
}

#[test]
fn test_hero_fights_guardian_in_corner() {
    let mut world = plain_world();
    for step in [3, 2, 1] {
        assert_eq!(world.explore(Coord::new(step, step)).unwrap(), Discovery::Claimed);
    }
    let discovery = world.explore(Coord::new(0, 0)).unwrap();
    assert_eq!(
        discovery,
        Discovery::GuardianDefeated {
            name: "Lava Titan".to_string(),
            levels_gained: 0
        }
    );
    let corner = world.tile(Coord::new(0, 0)).unwrap();
    assert!(*corner.owned());
    assert_eq!(*corner.army(), GUARDIAN_CAPTURE_ARMY);
    assert!(corner.guardian().as_ref().is_some_and(|g| *g.defeated()));
    assert_eq!(*world.hero().experience(), 50);
    assert_eq!(*world.hero().position(), Coord::new(0, 0));
}

#[test]
fn test_treasure_is_collected_before_claiming() {
    let mut world = World::generate(8, Element::Fire, &mut FixedSequence::constant(0.0)).unwrap();
    let spot = Coord::new(3, 3);
    assert_eq!(*world.tile(spot).unwrap().kind(), TileKind::Treasure);

    match world.explore(spot).unwrap() {
        Discovery::TreasureFound(item) => assert_eq!(*item.element(), Element::Fire),
        other => panic!("expected treasure, got {other:?}"),
    }
    assert!(!*world.tile(spot).unwrap().owned());
    assert_eq!(world.hero().items().len(), 1);

    assert_eq!(world.explore(spot).unwrap(), Discovery::Claimed);
    assert_eq!(world.explore(spot).unwrap(), Discovery::AlreadyOwned);
}

#[test]
fn test_conquest_stops_at_sixty_percent() {
    let mut world = plain_world();
    let mut explored = 0;
    while !world.is_won() {
        let next = world
            .tiles()
            .iter()
            .map(|t| *t.coord())
            .find(|c| !*world.tile(*c).unwrap().owned() && world.can_reach(*c))
            .expect("a reachable tile");
        world.explore(next).unwrap();
        explored += 1;
    }
    assert_eq!(world.owned_count(), 39);
    assert_eq!(explored, 38);
    assert_eq!(world.explore(Coord::new(0, 0)), Err(ExploreError::Finished));
}

#[test]
fn test_far_tile_out_of_reach() {
    let mut world = plain_world();
    let before = world.clone();
    assert_eq!(
        world.explore(Coord::new(0, 7)),
        Err(ExploreError::OutOfReach(Coord::new(0, 7)))
    );
    assert_eq!(world, before);
    assert!(matches!(world.explore(Coord::new(8, 0)), Err(ExploreError::Bounds(_))));
}
