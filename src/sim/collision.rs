//! Collision resolution
//!
//! Axis-aligned overlap tests between the player and the world. Obstacle
//! hits honor the configured policy; platform landings are directional so
//! an ascending player passes through from below.

use super::rect::Rect;
use crate::tuning::CollisionPolicy;

/// Obstacle hit test under the given policy.
///
/// `Inset` shrinks the obstacle box by `inset` units per side before
/// testing, which trims false-positive grazing hits.
pub fn obstacle_hit(player: Rect, obstacle: Rect, policy: CollisionPolicy, inset: f32) -> bool {
    let target = match policy {
        CollisionPolicy::Exact => obstacle,
        CollisionPolicy::Inset => obstacle.inset(inset),
    };
    player.overlaps(&target)
}

/// Platform landing test.
///
/// Counts only when the player's bottom edge sits inside the platform's top
/// band (band height = platform height), the horizontal ranges overlap, and
/// the player is falling. `vel_y <= 0` never lands.
pub fn platform_landing(player: Rect, platform: Rect, vel_y: f32) -> bool {
    if vel_y <= 0.0 {
        return false;
    }
    let bottom = player.bottom();
    bottom >= platform.y
        && bottom <= platform.bottom()
        && player.x < platform.right()
        && player.right() > platform.x
}

/// Collectible pickup is always the generous exact-box test.
pub fn pickup_overlap(player: Rect, egg: Rect) -> bool {
    player.overlaps(&egg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_policy_hits_on_raw_overlap() {
        let player = Rect::new(0.0, 0.0, 100.0, 100.0);
        let obstacle = Rect::new(95.0, 95.0, 40.0, 40.0);
        assert!(obstacle_hit(player, obstacle, CollisionPolicy::Exact, 10.0));
        assert!(!obstacle_hit(player, obstacle, CollisionPolicy::Inset, 10.0));
    }

    #[test]
    fn inset_hits_imply_exact_hits() {
        let player = Rect::new(0.0, 0.0, 100.0, 100.0);
        let obstacle = Rect::new(80.0, 80.0, 40.0, 40.0);
        let inset_hit = obstacle_hit(player, obstacle, CollisionPolicy::Inset, 10.0);
        let exact_hit = obstacle_hit(player, obstacle, CollisionPolicy::Exact, 10.0);
        assert!(inset_hit);
        assert!(exact_hit);
    }

    #[test]
    fn landing_requires_falling() {
        let platform = Rect::new(100.0, 300.0, 80.0, 14.0);
        // bottom edge inside the band, horizontally aligned
        let player = Rect::new(110.0, 240.0, 60.0, 60.0);
        assert!(platform_landing(player, platform, 5.0));
        assert!(!platform_landing(player, platform, 0.0));
        assert!(!platform_landing(player, platform, -5.0));
    }

    #[test]
    fn landing_requires_band_and_column() {
        let platform = Rect::new(100.0, 300.0, 80.0, 14.0);
        // bottom edge above the band
        assert!(!platform_landing(Rect::new(110.0, 200.0, 60.0, 60.0), platform, 5.0));
        // bottom edge below the band
        assert!(!platform_landing(Rect::new(110.0, 260.0, 60.0, 60.0), platform, 5.0));
        // right band, wrong column
        assert!(!platform_landing(Rect::new(300.0, 240.0, 60.0, 60.0), platform, 5.0));
    }

    #[test]
    fn band_edges_are_inclusive() {
        let platform = Rect::new(0.0, 300.0, 80.0, 14.0);
        let on_top = Rect::new(10.0, 240.0, 60.0, 60.0); // bottom == 300
        let at_base = Rect::new(10.0, 254.0, 60.0, 60.0); // bottom == 314
        assert!(platform_landing(on_top, platform, 1.0));
        assert!(platform_landing(at_base, platform, 1.0));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -200.0f32..200.0,
            -200.0f32..200.0,
            1.0f32..150.0,
            1.0f32..150.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_symmetry(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        // the inset hit set is a subset of the exact hit set
        #[test]
        fn inset_is_subset_of_exact(player in arb_rect(), obstacle in arb_rect(), inset in 0.0f32..30.0) {
            if obstacle_hit(player, obstacle, CollisionPolicy::Inset, inset) {
                prop_assert!(obstacle_hit(player, obstacle, CollisionPolicy::Exact, inset));
            }
        }

        #[test]
        fn never_lands_while_ascending(player in arb_rect(), platform in arb_rect(), vel in -100.0f32..=0.0) {
            prop_assert!(!platform_landing(player, platform, vel));
        }
    }
}
