//! Rejection-sampling circle packing under a hard attempt budget.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::prng::Xorshift64;

/// Draws consumed by every attempt: radius, x, y.
pub const DRAWS_PER_ATTEMPT: usize = 3;

/// An accepted circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// True when the gap between the two circles is at least `padding`.
    pub fn clears(&self, other: &Circle, padding: f64) -> bool {
        self.center.distance(other.center) >= self.radius + other.radius + padding
    }
}

/// Packing configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingOptions {
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub padding: f64,
    pub max_attempts: usize,
    pub bounds: Bounds,
}

/// Accepted circles and the number of trials that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub circles: Vec<Circle>,
    pub attempts: usize,
}

/// Packs circles by rejection sampling.
///
/// Each attempt draws a radius in `[min_radius, max_radius)`, then a center
/// inside `bounds` inset by that radius (the inset box's midpoint when it is
/// empty), and accepts the candidate if it clears every accepted circle by
/// `padding`. Stops after `count` acceptances or `max_attempts` trials,
/// whichever comes first, so fewer than `count` circles is a normal result.
pub fn pack_circles(rng: &mut Xorshift64, options: &PackingOptions) -> Packing {
    let lo = options.min_radius.min(options.max_radius);
    let hi = options.min_radius.max(options.max_radius);
    // acceptances never outnumber attempts
    let mut circles: Vec<Circle> = Vec::with_capacity(options.count.min(options.max_attempts));
    let mut attempts = 0;

    while circles.len() < options.count && attempts < options.max_attempts {
        attempts += 1;
        let radius = rng.next_range(lo, hi);
        let area = options.bounds.inset(radius);
        let x = sample_axis(rng, area.min.x, area.max.x);
        let y = sample_axis(rng, area.min.y, area.max.y);
        let candidate = Circle {
            center: Point::new(x, y),
            radius,
        };
        if circles.iter().all(|c| c.clears(&candidate, options.padding)) {
            circles.push(candidate);
        }
    }

    if circles.len() < options.count {
        tracing::debug!(
            placed = circles.len(),
            requested = options.count,
            attempts,
            "circle packing stopped at attempt budget"
        );
    }
    Packing { circles, attempts }
}

/// One draw, mapped into `[min, max)`, or the midpoint when the range is empty.
fn sample_axis(rng: &mut Xorshift64, min: f64, max: f64) -> f64 {
    let u = rng.next_f64();
    if max > min {
        min + u * (max - min)
    } else {
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(count: usize, max_attempts: usize) -> PackingOptions {
        PackingOptions {
            count,
            min_radius: 2.0,
            max_radius: 8.0,
            padding: 1.0,
            max_attempts,
            bounds: Bounds::from_rect(0.0, 0.0, 200.0, 200.0),
        }
    }

    #[test]
    fn accepted_circles_do_not_overlap() {
        let mut rng = Xorshift64::new(42);
        let packing = pack_circles(&mut rng, &options(60, 5000));
        for (i, a) in packing.circles.iter().enumerate() {
            for b in &packing.circles[i + 1..] {
                assert!(a.clears(b, 1.0), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn circles_stay_inside_bounds() {
        let mut rng = Xorshift64::new(3);
        let packing = pack_circles(&mut rng, &options(40, 2000));
        for c in &packing.circles {
            assert!(c.center.x - c.radius >= 0.0 && c.center.x + c.radius <= 200.0);
            assert!(c.center.y - c.radius >= 0.0 && c.center.y + c.radius <= 200.0);
        }
    }

    #[test]
    fn stops_at_target_count() {
        let mut rng = Xorshift64::new(7);
        let packing = pack_circles(&mut rng, &options(5, 10_000));
        assert_eq!(packing.circles.len(), 5);
        assert!(packing.attempts >= 5);
    }

    #[test]
    fn attempt_budget_is_a_hard_cap() {
        // Huge radii in a tiny box: only one circle can ever fit.
        let opts = PackingOptions {
            count: 50,
            min_radius: 40.0,
            max_radius: 45.0,
            padding: 0.0,
            max_attempts: 25,
            bounds: Bounds::from_rect(0.0, 0.0, 100.0, 100.0),
        };
        let mut rng = Xorshift64::new(11);
        let packing = pack_circles(&mut rng, &opts);
        assert_eq!(packing.attempts, 25);
        assert!(packing.circles.len() < 50);
    }

    #[test]
    fn each_attempt_consumes_three_draws() {
        let opts = PackingOptions {
            count: 1000,
            max_attempts: 17,
            ..options(0, 0)
        };
        let mut rng = Xorshift64::new(99);
        pack_circles(&mut rng, &opts);
        let mut expected = Xorshift64::new(99);
        expected.discard(17 * DRAWS_PER_ATTEMPT);
        assert_eq!(rng, expected);
    }

    #[test]
    fn huge_count_is_bounded_by_budget() {
        let opts = PackingOptions {
            count: usize::MAX,
            max_attempts: 10,
            ..options(0, 0)
        };
        let packing = pack_circles(&mut Xorshift64::new(8), &opts);
        assert_eq!(packing.attempts, 10);
        assert!(packing.circles.len() <= 10);
    }

    #[test]
    fn zero_budget_places_nothing() {
        let mut rng = Xorshift64::new(1);
        let packing = pack_circles(&mut rng, &options(10, 0));
        assert!(packing.circles.is_empty());
        assert_eq!(packing.attempts, 0);
    }

    #[test]
    fn same_seed_same_packing() {
        let a = pack_circles(&mut Xorshift64::new(5), &options(30, 3000));
        let b = pack_circles(&mut Xorshift64::new(5), &options(30, 3000));
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_exceeds_attempt_budget(
                seed: u64,
                count in 0_usize..200,
                max_attempts in 0_usize..500,
                min_radius in 0.0_f64..50.0,
                max_radius in 0.0_f64..120.0,
            ) {
                let opts = PackingOptions {
                    count,
                    min_radius,
                    max_radius,
                    padding: 0.5,
                    max_attempts,
                    bounds: Bounds::from_rect(0.0, 0.0, 100.0, 100.0),
                };
                let packing = pack_circles(&mut Xorshift64::new(seed), &opts);
                prop_assert!(packing.attempts <= max_attempts);
                prop_assert!(packing.circles.len() <= count);
                prop_assert!(packing.circles.len() <= packing.attempts);
            }
        }
    }
}
