//! Steering: движение к destination и yaw поворот.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::ai::{Ghost, GhostConfig, Locomotion, PatrolState};
use crate::schedules::TickClock;

/// Ниже этой скорости считаем что стоим (флаг анимации)
const MOVING_THRESHOLD: f32 = 0.01;

/// Сдвиг по прямой к `target` не больше чем на `max_delta`
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();

    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Yaw шаг (радианы) от `forward` к `desired`, не больше `max_step`.
///
/// Направление выбирается по знаку y-компоненты from-to кватерниона;
/// шаг обрезается оставшимся углом, чтобы не дёргаться вокруг цели.
pub fn yaw_step(forward: Vec3, desired: Vec3, max_step: f32) -> f32 {
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let desired = Vec3::new(desired.x, 0.0, desired.z).normalize_or_zero();
    if forward == Vec3::ZERO || desired == Vec3::ZERO {
        return 0.0;
    }

    let remaining = forward.angle_between(desired);
    let arc = Quat::from_rotation_arc(forward, desired);

    let sign = if arc.y.abs() > f32::EPSILON {
        arc.y.signum()
    } else if remaining > FRAC_PI_2 {
        // Ровно спиной: ось arc произвольная, крутимся влево
        1.0
    } else {
        0.0
    };

    sign * max_step.max(0.0).min(remaining)
}

/// Система: движение призраков (после patrol)
///
/// Скорость = `speed` в Traveling, 0 на паузе и без destination.
pub fn ghost_steering(
    mut ghosts: Query<(&mut Transform, &mut Locomotion, &PatrolState, &GhostConfig), With<Ghost>>,
    clock: Res<TickClock>,
) {
    let delta = clock.delta;

    for (mut transform, mut locomotion, state, config) in ghosts.iter_mut() {
        let Some(destination) = state.destination() else {
            locomotion.velocity = Vec3::ZERO;
            locomotion.is_moving = false;
            continue;
        };

        let start = transform.translation;
        let pace = state.pace(config.speed);
        transform.translation = move_towards(start, destination, pace * delta);

        let yaw = yaw_step(
            transform.forward().as_vec3(),
            destination - transform.translation,
            config.rotation_speed.to_radians() * delta,
        );
        if yaw != 0.0 {
            transform.rotate_y(yaw);
        }

        locomotion.velocity = if delta > 0.0 {
            (transform.translation - start) / delta
        } else {
            Vec3::ZERO
        };
        locomotion.is_moving = locomotion.velocity.length() > MOVING_THRESHOLD;
    }
}
