//! Reference elevations shared by every synthesized surface.

/// Storey height used for above-grade walls (ft).
pub const STOREY_HEIGHT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    /// Top of the foundation walls above grade.
    pub foundation_top: f64,
    /// Top of the above-grade walls.
    pub walls_top: f64,
}

impl Levels {
    /// `foundation_walls` yields `(height, depth_below_grade)` pairs.
    pub fn new(
        foundation_walls: impl IntoIterator<Item = (f64, f64)>,
        floors_above_grade: u32,
    ) -> Self {
        let foundation_top = foundation_walls
            .into_iter()
            .map(|(height, depth)| height - depth)
            .fold(0.0_f64, f64::max);
        Self {
            foundation_top,
            walls_top: foundation_top + STOREY_HEIGHT * f64::from(floors_above_grade),
        }
    }

    /// Elevation of the uppermost conditioned floor.
    pub fn top_floor(&self, floors_above_grade: u32) -> f64 {
        self.foundation_top + STOREY_HEIGHT * f64::from(floors_above_grade.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_only_house_starts_at_grade() {
        let levels = Levels::new(std::iter::empty(), 2);
        assert_eq!(levels.foundation_top, 0.0);
        assert_eq!(levels.walls_top, 16.0);
        assert_eq!(levels.top_floor(2), crate::STOREY_HEIGHT);
    }

    #[test]
    fn tallest_exposed_foundation_wall_wins() {
        let levels = Levels::new([(8.0, 7.0), (8.0, 6.5), (3.0, 3.0)], 1);
        assert_eq!(levels.foundation_top, 1.5);
        assert_eq!(levels.walls_top, 9.5);
    }

    #[test]
    fn fully_buried_walls_clamp_to_grade() {
        let levels = Levels::new([(4.0, 4.0)], 1);
        assert_eq!(levels.foundation_top, 0.0);
    }
}
