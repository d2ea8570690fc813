//! Tests for field-of-view scoring.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    use crate::components::Tag;
    use crate::spatial::{Hit, LayerMask, SpatialQuery};
    use crate::vision::{compute_view_score, ViewSweep, LINE_OF_SIGHT_EPSILON};

    /// Stub geometry: sweep отдаёт заданные hits, LOS луч блокируется
    /// для точек из `blocked`
    struct StubSpatial {
        hits: Vec<Hit>,
        blocked: HashSet<Entity>,
        /// LOS луч упирается в самого кандидата
        self_hits: HashSet<Entity>,
        sweep_calls: RefCell<Vec<(Vec3, f32, f32)>>,
        ray_lengths: RefCell<Vec<f32>>,
    }

    impl StubSpatial {
        fn new(hits: Vec<Hit>) -> Self {
            Self {
                hits,
                blocked: HashSet::new(),
                self_hits: HashSet::new(),
                sweep_calls: RefCell::new(Vec::new()),
                ray_lengths: RefCell::new(Vec::new()),
            }
        }

        fn block(mut self, entity: Entity) -> Self {
            self.blocked.insert(entity);
            self
        }

        fn hit_self(mut self, entity: Entity) -> Self {
            self.self_hits.insert(entity);
            self
        }
    }

    impl SpatialQuery for StubSpatial {
        fn ray_cast(
            &self,
            origin: Vec3,
            direction: Dir3,
            max_distance: f32,
            _mask: LayerMask,
        ) -> Option<Hit> {
            self.ray_lengths.borrow_mut().push(max_distance);
            let target = self
                .hits
                .iter()
                .find(|hit| Dir3::new(hit.point - origin).ok() == Some(direction))?;
            if self.self_hits.contains(&target.entity) {
                return Some(Hit {
                    entity: target.entity,
                    point: origin + *direction * max_distance,
                    distance: max_distance,
                });
            }
            self.blocked.contains(&target.entity).then(|| Hit {
                entity: Entity::PLACEHOLDER,
                point: origin + *direction * (max_distance * 0.5),
                distance: max_distance * 0.5,
            })
        }

        fn sphere_sweep(
            &self,
            origin: Vec3,
            radius: f32,
            _direction: Dir3,
            max_distance: f32,
            _mask: LayerMask,
        ) -> Vec<Hit> {
            self.sweep_calls
                .borrow_mut()
                .push((origin, radius, max_distance));
            self.hits.clone()
        }
    }

    const MONSTER: Entity = Entity::from_raw(1);
    const SPECIAL: Entity = Entity::from_raw(2);
    const WALL: Entity = Entity::from_raw(3);

    fn hit(entity: Entity, x: f32, z: f32) -> Hit {
        Hit {
            entity,
            point: Vec3::new(x, 0.0, z),
            distance: z.abs(),
        }
    }

    fn tag_of(entity: Entity) -> Option<Tag> {
        match entity {
            e if e == MONSTER => Some(Tag::Monster),
            e if e == SPECIAL => Some(Tag::SpecialMonster),
            e if e == WALL => Some(Tag::Untagged),
            _ => None,
        }
    }

    fn score(spatial: &StubSpatial) -> crate::vision::ViewScore {
        compute_view_score(
            Vec3::ZERO,
            Dir3::NEG_Z,
            &ViewSweep::default(),
            spatial,
            tag_of,
        )
    }

    #[test]
    fn test_single_unobstructed_monster_scores_one() {
        let spatial = StubSpatial::new(vec![hit(MONSTER, 0.0, -8.0)]);
        let result = score(&spatial);

        assert!(result.in_field_of_view);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.visible, vec![MONSTER]);
    }

    #[test]
    fn test_single_unobstructed_special_monster_scores_five() {
        let spatial = StubSpatial::new(vec![hit(SPECIAL, 1.0, -8.0)]);
        let result = score(&spatial);

        assert!(result.in_field_of_view);
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_obstructed_monster_contributes_nothing() {
        let spatial = StubSpatial::new(vec![hit(MONSTER, 0.0, -8.0)]).block(MONSTER);
        let result = score(&spatial);

        assert!(!result.in_field_of_view);
        assert_eq!(result.score, 0.0);
        assert!(result.visible.is_empty());
    }

    #[test]
    fn test_visible_monster_and_obstructed_special() {
        let spatial = StubSpatial::new(vec![
            hit(MONSTER, -2.0, -8.0),
            hit(SPECIAL, 2.0, -9.0),
        ])
        .block(SPECIAL);
        let result = score(&spatial);

        assert!(result.in_field_of_view);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.visible, vec![MONSTER]);
    }

    #[test]
    fn test_los_ray_reaching_candidate_itself_is_not_obstruction() {
        let spatial = StubSpatial::new(vec![hit(MONSTER, 0.0, -0.7)]).hit_self(MONSTER);
        let result = score(&spatial);

        assert!(result.in_field_of_view);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.visible, vec![MONSTER]);
    }

    #[test]
    fn test_no_hits_zero_score() {
        let spatial = StubSpatial::new(Vec::new());
        let result = score(&spatial);

        assert!(!result.in_field_of_view);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_untagged_hits_ignored_without_los_ray() {
        let spatial = StubSpatial::new(vec![hit(WALL, 0.0, -5.0)]);
        let result = score(&spatial);

        assert_eq!(result.score, 0.0);
        assert!(spatial.ray_lengths.borrow().is_empty());
    }

    #[test]
    fn test_repeat_scoring_is_idempotent() {
        let spatial = StubSpatial::new(vec![
            hit(MONSTER, 0.0, -8.0),
            hit(SPECIAL, 1.0, -9.0),
        ]);

        let first = score(&spatial);
        let second = score(&spatial);
        assert_eq!(first, second);
        assert_eq!(first.score, 6.0);
    }

    #[test]
    fn test_sweep_starts_min_distance_ahead() {
        let spatial = StubSpatial::new(vec![hit(MONSTER, 0.0, -8.0)]);
        let sweep = ViewSweep {
            radius: 0.75,
            min_distance: 2.0,
            max_distance: 30.0,
            ..Default::default()
        };
        compute_view_score(Vec3::new(1.0, 1.5, 0.0), Dir3::NEG_Z, &sweep, &spatial, tag_of);

        let calls = spatial.sweep_calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (Vec3::new(1.0, 1.5, -2.0), 0.75, 30.0));
    }

    #[test]
    fn test_los_ray_shortened_by_epsilon() {
        let spatial = StubSpatial::new(vec![hit(MONSTER, 0.0, -8.0)]);
        score(&spatial);

        let lengths = spatial.ray_lengths.borrow();
        assert_eq!(lengths.len(), 1);
        assert!((lengths[0] - (8.0 - LINE_OF_SIGHT_EPSILON)).abs() < 1e-5);
    }
}
