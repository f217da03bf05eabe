//! Heart markers spawned by [`LikerWidget`](super::LikerWidget).

use rand::seq::SliceRandom;
use rand::Rng;

/// One of the CSS keyframe paths a heart can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trajectory {
    DriftLeft,
    DriftRight,
    Rise,
    Sway,
}

impl Trajectory {
    pub const ALL: [Trajectory; 4] = [
        Trajectory::DriftLeft,
        Trajectory::DriftRight,
        Trajectory::Rise,
        Trajectory::Sway,
    ];

    /// Name of the `@keyframes` rule in `liker.css`.
    pub fn keyframes(self) -> &'static str {
        match self {
            Trajectory::DriftLeft => "liker-drift-left",
            Trajectory::DriftRight => "liker-drift-right",
            Trajectory::Rise => "liker-rise",
            Trajectory::Sway => "liker-sway",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Trajectory::Rise)
    }
}

/// Element box in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Horizontal centre and top edge of `target`, relative to `anchor` (the
/// positioned wrapper the markers are laid out in).
pub fn marker_origin(target: Bounds, anchor: Bounds) -> Point {
    Point {
        x: target.left - anchor.left + target.width / 2.0,
        y: target.top - anchor.top,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub id: u64,
    pub origin: Point,
    pub trajectory: Trajectory,
}

impl Heart {
    /// Position and trajectory; duration and easing come from `.liker__heart`.
    pub fn style(&self) -> String {
        format!(
            "left: {}px; top: {}px; animation-name: {};",
            self.origin.x,
            self.origin.y,
            self.trajectory.keyframes()
        )
    }
}

/// Live markers of one widget. Ids are never reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikerEngine {
    hearts: Vec<Heart>,
    next_id: u64,
}

impl LikerEngine {
    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, origin: Point, rng: &mut R) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.hearts.push(Heart {
            id,
            origin,
            trajectory: Trajectory::random(rng),
        });
        id
    }

    /// Remove a finished marker. Returns `false` if it was already gone.
    pub fn finish(&mut self, id: u64) -> bool {
        let before = self.hearts.len();
        self.hearts.retain(|heart| heart.id != id);
        self.hearts.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn origin_is_top_centre_relative_to_anchor() {
        let anchor = Bounds {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 300.0,
        };
        let target = Bounds {
            left: 140.0,
            top: 90.0,
            width: 60.0,
            height: 32.0,
        };
        assert_eq!(marker_origin(target, anchor), Point { x: 70.0, y: 40.0 });
    }

    #[test]
    fn every_click_spawns_one_marker() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = LikerEngine::default();
        let id = engine.spawn(Point::default(), &mut rng);
        assert_eq!(engine.hearts().len(), 1);
        assert_eq!(engine.hearts()[0].id, id);
    }

    #[test]
    fn markers_are_removed_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = LikerEngine::default();
        let id = engine.spawn(Point::default(), &mut rng);
        assert!(engine.finish(id));
        assert!(!engine.finish(id));
        assert!(engine.hearts().is_empty());
    }

    #[test]
    fn rapid_clicks_are_independent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut engine = LikerEngine::default();
        let ids: Vec<u64> = (0..25)
            .map(|i| engine.spawn(Point { x: i as f64, y: 0.0 }, &mut rng))
            .collect();

        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(engine.hearts().len(), 25);

        // Animations can finish out of order.
        for id in ids.iter().rev().step_by(2) {
            assert!(engine.finish(*id));
        }
        for id in &ids {
            engine.finish(*id);
        }
        assert!(engine.hearts().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = LikerEngine::default();
        let first = engine.spawn(Point::default(), &mut rng);
        engine.finish(first);
        let second = engine.spawn(Point::default(), &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn all_trajectories_get_picked() {
        let mut rng = StdRng::seed_from_u64(99);
        let picked: HashSet<_> = (0..200).map(|_| Trajectory::random(&mut rng)).collect();
        assert_eq!(picked.len(), Trajectory::ALL.len());
    }

    #[test]
    fn heart_style_carries_position_and_animation() {
        let heart = Heart {
            id: 0,
            origin: Point { x: 30.0, y: 12.5 },
            trajectory: Trajectory::Sway,
        };
        assert_eq!(
            heart.style(),
            "left: 30px; top: 12.5px; animation-name: liker-sway;"
        );
    }
}
