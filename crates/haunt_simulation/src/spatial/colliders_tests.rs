//! Tests for the built-in collider backend.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::spatial::{
        ColliderWorld, SpatialQuery, LAYER_ACTORS, LAYER_ENVIRONMENT, MASK_ALL,
    };

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_ray_hits_nearest_sphere() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(0.0, 0.0, -10.0), 1.0, LAYER_ACTORS)
            .with_sphere(entity(2), Vec3::new(0.0, 0.0, -5.0), 1.0, LAYER_ACTORS);

        let hit = world
            .ray_cast(Vec3::ZERO, Dir3::NEG_Z, 100.0, MASK_ALL)
            .expect("ray should hit");

        assert_eq!(hit.entity, entity(2));
        assert!((hit.distance - 4.0).abs() < 1e-4, "distance = {}", hit.distance);
        assert!(hit.point.distance(Vec3::new(0.0, 0.0, -4.0)) < 1e-4);
    }

    #[test]
    fn test_ray_respects_max_distance_and_mask() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(10.0, 0.0, 0.0), 1.0, LAYER_ENVIRONMENT);

        assert!(world.ray_cast(Vec3::ZERO, Dir3::X, 5.0, MASK_ALL).is_none());
        assert!(world.ray_cast(Vec3::ZERO, Dir3::X, 50.0, LAYER_ACTORS).is_none());
        assert!(world.ray_cast(Vec3::ZERO, Dir3::X, 50.0, LAYER_ENVIRONMENT).is_some());
    }

    #[test]
    fn test_ray_starting_inside_collider_ignores_it() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::ZERO, 1.0, LAYER_ACTORS)
            .with_sphere(entity(2), Vec3::new(5.0, 0.0, 0.0), 1.0, LAYER_ACTORS);

        let hit = world
            .ray_cast(Vec3::ZERO, Dir3::X, 100.0, MASK_ALL)
            .expect("ray should pass through own collider");
        assert_eq!(hit.entity, entity(2));
    }

    #[test]
    fn test_ray_hits_cuboid_wall() {
        let world = ColliderWorld::default().with_cuboid(
            entity(7),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.5, 2.0, 2.0),
            LAYER_ENVIRONMENT,
        );

        let hit = world
            .ray_cast(Vec3::ZERO, Dir3::X, 10.0, MASK_ALL)
            .expect("wall should be hit");
        assert_eq!(hit.entity, entity(7));
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_collects_all_hits_sorted() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(0.0, 0.0, -12.0), 0.5, LAYER_ACTORS)
            .with_sphere(entity(2), Vec3::new(0.8, 0.0, -6.0), 0.5, LAYER_ACTORS)
            .with_sphere(entity(3), Vec3::new(10.0, 0.0, -6.0), 0.5, LAYER_ACTORS);

        let hits = world.sphere_sweep(Vec3::ZERO, 1.0, Dir3::NEG_Z, 20.0, MASK_ALL);

        let entities: Vec<Entity> = hits.iter().map(|hit| hit.entity).collect();
        assert_eq!(entities, vec![entity(2), entity(1)]);
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_sweep_reports_initial_overlap_at_zero() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(0.5, 0.0, 0.0), 0.5, LAYER_ACTORS);

        let hits = world.sphere_sweep(Vec3::ZERO, 1.0, Dir3::NEG_Z, 5.0, MASK_ALL);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_sweep_starting_inside_collider_reports_surface_point() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(0.0, 0.0, -1.2), 0.5, LAYER_ACTORS)
            .with_cuboid(
                entity(2),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
                LAYER_ACTORS,
            );

        let start = Vec3::new(0.0, 0.0, -1.0);
        let hits = world.sphere_sweep(start, 1.0, Dir3::NEG_Z, 5.0, MASK_ALL);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance, 0.0);
        let point = hits[0].point;
        assert!(point.distance(Vec3::new(0.0, 0.0, -0.7)) < 1e-4, "point = {:?}", point);

        // Внутри cuboid: ближайшая грань x = 9
        let inside_box = Vec3::new(9.2, 0.1, 0.0);
        let hits = world.sphere_sweep(inside_box, 0.5, Dir3::NEG_Z, 5.0, MASK_ALL);
        assert_eq!(hits.len(), 1);
        let point = hits[0].point;
        assert!(point.distance(Vec3::new(9.0, 0.1, 0.0)) < 1e-4, "point = {:?}", point);
    }

    #[test]
    fn test_sweep_contact_point_on_collider_surface() {
        let world = ColliderWorld::default()
            .with_sphere(entity(1), Vec3::new(0.0, 0.0, -10.0), 1.0, LAYER_ACTORS);

        let hits = world.sphere_sweep(Vec3::ZERO, 0.5, Dir3::NEG_Z, 20.0, MASK_ALL);
        assert_eq!(hits.len(), 1);
        // Сфера касается коллайдера на z = -9
        assert!(hits[0].point.distance(Vec3::new(0.0, 0.0, -9.0)) < 1e-3);
        assert!((hits[0].distance - 8.5).abs() < 1e-3);
    }

    #[test]
    fn test_sync_collider_world_from_ecs() {
        use crate::spatial::{sync_collider_world, Collider, CollisionLayers};

        let mut app = App::new();
        app.init_resource::<ColliderWorld>()
            .add_systems(Update, sync_collider_world);

        app.world_mut().spawn((
            Collider::sphere(1.0),
            CollisionLayers::new(LAYER_ACTORS),
            Transform::from_xyz(0.0, 0.0, -3.0),
        ));
        app.world_mut().spawn((
            Collider::cuboid(1.0, 1.0, 1.0),
            Transform::from_xyz(4.0, 0.0, 0.0),
        ));

        app.update();

        let world = app.world().resource::<ColliderWorld>();
        assert_eq!(world.len(), 2);
        assert!(world.ray_cast(Vec3::ZERO, Dir3::NEG_Z, 10.0, LAYER_ACTORS).is_some());
    }
}
