use game_types::Tier;

/// Map a cumulative score to its tier: first tier, walking the thresholds from
/// highest to lowest, whose threshold the score meets. Bronze (threshold 0)
/// always matches.
pub fn classify(score: i32) -> Tier {
    Tier::descending()
        .into_iter()
        .find(|tier| score >= tier.threshold())
        .unwrap_or(Tier::Bronze)
}

/// Tier renames must not read as promotions, so compare thresholds.
pub fn is_promotion(from: Tier, to: Tier) -> bool {
    to.threshold() > from.threshold()
}

pub fn is_demotion(from: Tier, to: Tier) -> bool {
    to.threshold() < from.threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify(0), Tier::Bronze);
        assert_eq!(classify(499), Tier::Bronze);
        assert_eq!(classify(500), Tier::Silver);
        assert_eq!(classify(1999), Tier::Silver);
        assert_eq!(classify(2000), Tier::Gold);
        assert_eq!(classify(4999), Tier::Gold);
        assert_eq!(classify(5000), Tier::Platinum);
        assert_eq!(classify(9999), Tier::Platinum);
        assert_eq!(classify(10000), Tier::Diamond);
        assert_eq!(classify(1_000_000), Tier::Diamond);
    }

    #[test]
    fn test_negative_score_falls_back_to_bronze() {
        assert_eq!(classify(-50), Tier::Bronze);
    }

    #[test]
    fn test_classification_monotonic_in_score() {
        let mut last_threshold = i32::MIN;
        for score in (0..=12_000).step_by(250) {
            let threshold = classify(score).threshold();
            assert!(threshold >= last_threshold);
            last_threshold = threshold;
        }
    }

    #[test]
    fn test_promotion_detected_by_threshold_not_name() {
        assert!(is_promotion(Tier::Bronze, Tier::Silver));
        assert!(is_promotion(Tier::Gold, Tier::Diamond));
        assert!(!is_promotion(Tier::Gold, Tier::Gold));
        assert!(!is_promotion(Tier::Silver, Tier::Bronze));

        assert!(is_demotion(Tier::Silver, Tier::Bronze));
        assert!(!is_demotion(Tier::Bronze, Tier::Bronze));
    }
}
