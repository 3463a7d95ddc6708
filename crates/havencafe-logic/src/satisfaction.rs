//! Customer satisfaction scoring.
//!
//! Satisfaction is a 1.0-5.0 score combining dish quality against the
//! customer's expectation, service speed against their patience, and the
//! serving staff's efficiency.

const QUALITY_WEIGHT: f32 = 0.6;
const SPEED_WEIGHT: f32 = 0.3;
const STAFF_WEIGHT: f32 = 0.1;

/// Inputs for a satisfaction evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ServiceReview {
    /// Quality of the dish served (1-5).
    pub dish_quality: u8,
    /// The customer's quality expectation (2-4).
    pub expectation: u8,
    /// How long the customer waited, in game hours.
    pub wait_hours: f32,
    /// The customer's maximum patience, in game hours.
    pub patience_hours: f32,
    /// Serving staff efficiency (0.5-1.2).
    pub staff_efficiency: f32,
}

/// Score a completed service, clamped to [1.0, 5.0].
pub fn score(review: &ServiceReview) -> f32 {
    let quality_score = 3.0 + review.dish_quality as f32 - review.expectation as f32;

    let wait_ratio = if review.patience_hours > 0.0 {
        review.wait_hours / review.patience_hours
    } else {
        1.0
    };
    let speed_score = if wait_ratio < 0.3 {
        5.0
    } else if wait_ratio < 0.6 {
        4.0
    } else if wait_ratio < 0.8 {
        3.0
    } else {
        2.0
    };

    let staff_score = 3.0 + (review.staff_efficiency - 1.0) * 2.0;

    let combined = quality_score * QUALITY_WEIGHT
        + speed_score * SPEED_WEIGHT
        + staff_score * STAFF_WEIGHT;
    combined.clamp(1.0, 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_review() -> ServiceReview {
        ServiceReview {
            dish_quality: 3,
            expectation: 3,
            wait_hours: 0.2,
            patience_hours: 2.0,
            staff_efficiency: 1.0,
        }
    }

    #[test]
    fn test_perfect_service_near_max() {
        let review = ServiceReview {
            dish_quality: 5,
            expectation: 2,
            wait_hours: 0.1,
            patience_hours: 2.0,
            staff_efficiency: 1.2,
        };
        assert!(score(&review) > 4.5);
    }

    #[test]
    fn test_meeting_expectations_is_neutral_or_better() {
        let s = score(&base_review());
        assert!((3.0..=4.5).contains(&s));
    }

    #[test]
    fn test_slow_service_hurts() {
        let fast = score(&base_review());
        let slow = score(&ServiceReview {
            wait_hours: 1.9,
            ..base_review()
        });
        assert!(slow < fast);
    }

    #[test]
    fn test_disappointing_dish_hurts() {
        let s = score(&ServiceReview {
            dish_quality: 1,
            expectation: 4,
            ..base_review()
        });
        assert!(s < 2.5);
    }

    #[test]
    fn test_score_clamped() {
        let terrible = ServiceReview {
            dish_quality: 1,
            expectation: 4,
            wait_hours: 5.0,
            patience_hours: 2.0,
            staff_efficiency: 0.5,
        };
        assert!(score(&terrible) >= 1.0);
        let zero_patience = ServiceReview {
            patience_hours: 0.0,
            ..base_review()
        };
        assert!(score(&zero_patience) >= 1.0);
    }
}
