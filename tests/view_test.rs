use std::collections::HashSet;

use sparse_ecs::{EntityId, World};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spin {
    rate: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tint {
    alpha: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Ghost {
    value: u8,
}

/// Ten entities with `Position`; every third one also gets `Velocity`.
fn populate(world: &mut World) -> Vec<EntityId> {
    let mut ids = Vec::new();
    for i in 0..10u32 {
        let mut entity = world.entity();
        let id = entity.id();
        entity.set(Position { x: i as f32, y: 0.0 });
        if i % 3 == 0 {
            entity.set(Velocity { dx: 1.0, dy: 1.0 });
        }
        ids.push(id);
    }
    ids
}

#[test]
fn join_visits_exactly_the_intersection() {
    let mut world = World::new();
    let ids = populate(&mut world);

    let mut visited = HashSet::new();
    world.view::<(Position, Velocity)>().each(|entity, _, _| {
        visited.insert(entity);
    });

    let expected: HashSet<EntityId> = [ids[0], ids[3], ids[6]].into_iter().collect();
    assert_eq!(visited, expected);
}

#[test]
fn join_yields_references_into_both_columns() {
    let mut world = World::new();
    populate(&mut world);

    world.view::<(Position, Velocity)>().each(|entity, position, velocity| {
        assert_eq!(position.x, entity as f32);
        assert_eq!(velocity.dx, 1.0);
    });
}

#[test]
fn len_hint_is_the_smallest_column() {
    let mut world = World::new();
    populate(&mut world);

    assert_eq!(world.view::<(Position, Velocity)>().len_hint(), 3);
    assert_eq!(world.view::<(Position,)>().len_hint(), 10);
}

#[test]
fn single_type_view_scans_dense_order() {
    let mut world = World::new();
    let ids = populate(&mut world);

    let mut seen = Vec::new();
    world.view::<(Position,)>().each(|entity, position| {
        assert_eq!(position.x, entity as f32);
        seen.push(entity);
    });

    assert_eq!(seen, ids);
}

#[test]
fn view_over_never_stored_type_is_empty() {
    let mut world = World::new();
    populate(&mut world);

    let mut count = 0;
    world.view::<(Ghost,)>().each(|_, _| count += 1);
    assert_eq!(count, 0);

    world.view::<(Position, Ghost)>().each(|_, _, _| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn three_way_join_probes_all_columns() {
    let mut world = World::new();
    let ids = populate(&mut world);

    world.entity_ref(ids[3]).set(Spin { rate: 2.0 });
    world.entity_ref(ids[4]).set(Spin { rate: 2.0 });

    let mut visited = Vec::new();
    world
        .view::<(Position, Velocity, Spin)>()
        .each(|entity, _, _, spin| {
            assert_eq!(spin.rate, 2.0);
            visited.push(entity);
        });

    assert_eq!(visited, vec![ids[3]]);
}

#[test]
fn four_way_join_visits_the_narrowest_intersection() {
    let mut world = World::new();
    let ids = populate(&mut world);

    // Velocity sits on ids 0, 3, 6; narrow further with Spin and Tint.
    world.entity_ref(ids[3]).set(Spin { rate: 2.0 });
    world.entity_ref(ids[6]).set(Spin { rate: 2.0 });
    world.entity_ref(ids[6]).set(Tint { alpha: 0.5 });
    world.entity_ref(ids[9]).set(Tint { alpha: 0.5 });

    let mut visited = Vec::new();
    world
        .view::<(Position, Velocity, Spin, Tint)>()
        .each(|entity, position, velocity, spin, tint| {
            assert_eq!(position.x, entity as f32);
            assert_eq!(velocity.dx, 1.0);
            assert_eq!(spin.rate, 2.0);
            assert_eq!(tint.alpha, 0.5);
            visited.push(entity);
        });

    assert_eq!(visited, vec![ids[6]]);
}

#[test]
fn removal_shrinks_the_join() {
    let mut world = World::new();
    let ids = populate(&mut world);

    world.entity_ref(ids[3]).remove::<Velocity>();

    let mut visited = HashSet::new();
    world.view::<(Position, Velocity)>().each(|entity, _, _| {
        visited.insert(entity);
    });

    let expected: HashSet<EntityId> = [ids[0], ids[6]].into_iter().collect();
    assert_eq!(visited, expected);
}

#[test]
fn each_mut_updates_every_element() {
    let mut world = World::new();
    let ids = populate(&mut world);

    world.each_mut::<Position, _>(|_, position| {
        position.y = position.x * 2.0;
    });

    for &id in &ids {
        let position = *world.entity_ref(id).get::<Position>().unwrap();
        assert_eq!(position.y, position.x * 2.0);
    }
}

#[test]
fn empty_world_view_is_silent() {
    let mut world = World::new();
    let mut count = 0;
    world.view::<(Position, Velocity)>().each(|_, _, _| count += 1);
    assert_eq!(count, 0);
}
