use sparse_ecs::World;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Health {
    value: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Shield {
    value: f32,
}

#[test]
fn add_attaches_component() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.add::<Health>();
    assert!(entity.has::<Health>());
}

#[test]
fn add_stores_default_value() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.add::<Health>();
    assert_eq!(entity.get::<Health>(), Some(&Health::default()));
}

#[test]
fn set_attaches_when_absent() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.set(Health { value: 42 });
    assert!(entity.has::<Health>());
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 42 }));
}

#[test]
fn add_then_set_stores_value() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.add::<Health>().set(Health { value: 42 });
    assert!(entity.has::<Health>());
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 42 }));
}

#[test]
fn add_multiple_components() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.add::<Health>().add::<Shield>();
    assert!(entity.has_all::<(Health, Shield)>());
}

#[test]
fn set_multiple_components() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity
        .add::<Health>()
        .add::<Shield>()
        .set(Health { value: 42 })
        .set(Shield { value: 3.14 });

    assert!(entity.has_all::<(Health, Shield)>());
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 42 }));
    assert_eq!(entity.get::<Shield>(), Some(&Shield { value: 3.14 }));
}

#[test]
fn remove_detaches_component() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.add::<Health>().remove::<Health>();
    assert!(!entity.has::<Health>());
}

#[test]
fn remove_keeps_other_components() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity
        .set(Health { value: 7 })
        .set(Shield { value: 1.0 })
        .remove::<Shield>();

    assert!(!entity.has::<Shield>());
    assert!(entity.has::<Health>());
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 7 }));
}

#[test]
fn remove_absent_is_noop() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.remove::<Health>();
    assert!(!entity.has::<Health>());
}

#[test]
fn set_twice_keeps_last_value() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.set(Health { value: 1 }).set(Health { value: 2 });
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 2 }));
}

#[test]
fn add_on_present_resets_to_default() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.set(Health { value: 42 }).add::<Health>();
    assert_eq!(entity.get::<Health>(), Some(&Health::default()));
}

#[test]
fn add_remove_add_is_consistent() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity
        .set(Health { value: 1 })
        .remove::<Health>()
        .set(Health { value: 2 });

    assert!(entity.has::<Health>());
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 2 }));
}

#[test]
fn get_mut_updates_in_place() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.set(Health { value: 1 });
    entity.get_mut::<Health>().unwrap().value = 99;
    assert_eq!(entity.get::<Health>(), Some(&Health { value: 99 }));
}

#[test]
fn get_absent_returns_none() {
    let mut world = World::new();
    let entity = world.entity();
    assert_eq!(entity.get::<Health>(), None);
}

#[test]
fn component_names_reflect_composition() {
    let mut world = World::new();
    let mut entity = world.entity();
    entity.set(Health { value: 1 }).set(Shield { value: 1.0 });

    let names = entity.component_names();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|name| name.ends_with("Health")));
    assert!(names.iter().any(|name| name.ends_with("Shield")));
}
