//! Star display for fractional ratings.

/// Slack for float error at the half-star band edges.
const EDGE_EPSILON: f64 = 1e-9;

/// How many filled, half and empty stars to draw. Always five in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarDisplay {
    pub filled: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarDisplay {
    /// Compute the display for an average rating.
    ///
    /// A remainder in [0.3, 0.7] draws a half star; above 0.7 it rounds up
    /// to a full star. The band edges allow `EDGE_EPSILON` of float error so
    /// that values like 4.3 still draw a half star.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };

        let whole = rating.floor();
        let remainder = rating - whole;

        let mut filled = whole as u8;
        let mut half = false;
        if remainder > 0.7 + EDGE_EPSILON {
            filled += 1;
        } else if remainder >= 0.3 - EDGE_EPSILON {
            half = true;
        }

        let filled = filled.min(5);
        let empty = 5 - filled - u8::from(half);
        Self { filled, half, empty }
    }

    /// Display for a whole-number score.
    pub fn from_score(score: u8) -> Self {
        let filled = score.min(5);
        Self {
            filled,
            half: false,
            empty: 5 - filled,
        }
    }
}
