//! Headless симуляция HAUNT
//!
//! Поднимает уровень без рендера: игрок с камерой, пара стен, призрак.
//! Гоняет logic/physics тики и пишет в лог, что видит игрок и куда
//! призрак уводит сцену.

use bevy::prelude::*;
use haunt_simulation::spatial::{LAYER_ACTORS, LAYER_ENVIRONMENT};
use haunt_simulation::*;

const LOGIC_DT: f32 = 1.0 / 60.0;
const PHYSICS_DT: f32 = 1.0 / 50.0;
const TOTAL_FRAMES: u32 = 1200;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting HAUNT headless simulation (seed: {})", seed));

    let world = app.world_mut();
    world.insert_resource(MapGrid::new(5, 5, 10));

    let player = world
        .spawn((
            Tag::Player,
            Transform::from_xyz(20.0, 1.5, 20.0),
            Collider::sphere(0.4),
            CollisionLayers::new(LAYER_ACTORS),
            ViewSweep::default(),
        ))
        .id();

    for (x, z) in [(20.0, 10.0), (30.0, 20.0)] {
        world.spawn((
            Transform::from_xyz(x, 1.5, z),
            Collider::cuboid(3.0, 1.5, 0.2),
            CollisionLayers::new(LAYER_ENVIRONMENT),
        ));
    }

    let ghost = match spawn_ghost(world, player, Vec3::new(5.0, 0.0, 5.0), GhostConfig::default()) {
        Ok(ghost) => ghost,
        Err(err) => {
            log_error(&format!("Ghost spawn failed: {}", err));
            return;
        }
    };

    let mut physics_accumulator = 0.0;

    for frame in 0..TOTAL_FRAMES {
        let world = app.world_mut();

        world.on_logic_tick(LOGIC_DT);

        // Physics step по фиксированному шагу
        physics_accumulator += LOGIC_DT;
        while physics_accumulator >= PHYSICS_DT {
            physics_accumulator -= PHYSICS_DT;
            world.on_physics_tick(PHYSICS_DT);
        }

        if let Some(request) = drain_scene_requests(world).into_iter().next() {
            log_warning(&format!(
                "Frame {}: ghost {:?} requests scene '{}'",
                frame, request.ghost, request.scene
            ));
            log_info("Simulation complete (player caught)");
            return;
        }

        if frame % 120 == 0 {
            let report = world.resource::<ViewerReport>();
            let state = world.get::<PatrolState>(ghost);
            let position = world.get::<Transform>(ghost).map(|t| t.translation);
            log_info(&format!(
                "Frame {}: view score {} (in view: {}), ghost {:?} at {:?}",
                frame, report.score, report.in_field_of_view, state, position
            ));
        }
    }

    log_info("Simulation complete!");
}
