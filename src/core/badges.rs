//! Badge/achievement derivation.
//!
//! Badges are never persisted: the tier set is a pure function of the
//! member's approved-submission counts and is recomputed on every request.
//! Three fixed categories map onto the counts - Explorer tracks all approved
//! submissions, Coffee Lover tracks cafe submissions, Foodie tracks
//! restaurant submissions - and each category has five tiers with fixed
//! thresholds.

use crate::{
    entities::{
        Submission,
        submission::{self, StoreCategory, SubmissionStatus},
    },
    errors::Result,
};
use sea_orm::prelude::*;

/// Ordered requirement thresholds shared by all badge categories.
pub const TIER_THRESHOLDS: [u32; 5] = [1, 5, 10, 25, 50];

/// The three fixed badge categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCategory {
    /// All approved submissions, any store category
    Explorer,
    /// Approved cafe submissions
    CoffeeLover,
    /// Approved restaurant submissions
    Foodie,
}

impl BadgeCategory {
    /// Human-readable badge category name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Explorer => "Explorer",
            Self::CoffeeLover => "Coffee Lover",
            Self::Foodie => "Foodie",
        }
    }
}

/// A single badge tier with its computed achievement state.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeTier {
    /// Which badge category this tier belongs to
    pub category: BadgeCategory,
    /// Tier level, 1 through 5
    pub level: u8,
    /// Approved-submission count required to achieve this tier
    pub threshold: u32,
    /// Whether the count has reached the threshold
    pub achieved: bool,
    /// Progress toward the threshold as a percentage, capped at 100
    pub progress_percent: f64,
}

/// Approved-submission counts partitioned the way the badge categories
/// consume them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovedCounts {
    /// All approved submissions
    pub total: u32,
    /// Approved submissions against restaurant stores
    pub restaurant: u32,
    /// Approved submissions against cafe stores
    pub cafe: u32,
}

impl ApprovedCounts {
    /// The count feeding a given badge category.
    #[must_use]
    pub const fn for_category(&self, category: BadgeCategory) -> u32 {
        match category {
            BadgeCategory::Explorer => self.total,
            BadgeCategory::CoffeeLover => self.cafe,
            BadgeCategory::Foodie => self.restaurant,
        }
    }
}

/// Progress toward a threshold as a percentage, capped at 100.
fn tier_progress(count: u32, threshold: u32) -> f64 {
    (f64::from(count) / f64::from(threshold)).min(1.0) * 100.0
}

/// Computes the five tiers of one badge category from its count.
#[must_use]
pub fn tiers_for_category(category: BadgeCategory, count: u32) -> Vec<BadgeTier> {
    (1u8..)
        .zip(TIER_THRESHOLDS)
        .map(|(level, threshold)| BadgeTier {
            category,
            level,
            threshold,
            achieved: count >= threshold,
            progress_percent: tier_progress(count, threshold),
        })
        .collect()
}

/// Computes all fifteen badge tiers from the given counts.
///
/// The result is category-major (Explorer, Coffee Lover, Foodie), each with
/// levels ascending. Identical counts always yield an identical tier set.
#[must_use]
pub fn compute_badges(counts: &ApprovedCounts) -> Vec<BadgeTier> {
    [
        BadgeCategory::Explorer,
        BadgeCategory::CoffeeLover,
        BadgeCategory::Foodie,
    ]
    .into_iter()
    .flat_map(|category| tiers_for_category(category, counts.for_category(category)))
    .collect()
}

/// Counts a member's approved submissions, partitioned by store category.
///
/// The partition is derived over the fetched rows rather than with separate
/// aggregate queries; submission lists are small enough that one fetch is
/// the simpler contract.
pub async fn approved_counts_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<ApprovedCounts> {
    let approved = Submission::find()
        .filter(submission::Column::UserId.eq(user_id))
        .filter(submission::Column::Status.eq(SubmissionStatus::Approved))
        .all(db)
        .await?;

    let mut counts = ApprovedCounts::default();
    for row in &approved {
        counts.total += 1;
        match row.store_category {
            StoreCategory::Restaurant => counts.restaurant += 1,
            StoreCategory::Cafe => counts.cafe += 1,
            StoreCategory::Others => {}
        }
    }
    Ok(counts)
}

/// Fetches a member's approved counts and computes their full tier set.
pub async fn badge_progress_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<BadgeTier>> {
    let counts = approved_counts_for_user(db, user_id).await?;
    Ok(compute_badges(&counts))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn tiers_of(badges: &[BadgeTier], category: BadgeCategory) -> Vec<&BadgeTier> {
        badges.iter().filter(|t| t.category == category).collect()
    }

    #[test]
    fn test_zero_counts_achieve_nothing() {
        let badges = compute_badges(&ApprovedCounts::default());

        assert_eq!(badges.len(), 15);
        assert!(badges.iter().all(|t| !t.achieved));
        assert!(badges.iter().all(|t| t.progress_percent == 0.0));
    }

    #[test]
    fn test_achievement_tracks_thresholds_exactly() {
        for threshold in TIER_THRESHOLDS {
            let at = tiers_for_category(BadgeCategory::Explorer, threshold);
            let below = tiers_for_category(BadgeCategory::Explorer, threshold - 1);

            let tier_at = at.iter().find(|t| t.threshold == threshold).unwrap();
            let tier_below = below.iter().find(|t| t.threshold == threshold).unwrap();

            assert!(tier_at.achieved, "count {threshold} must achieve tier");
            assert_eq!(tier_at.progress_percent, 100.0);
            assert!(!tier_below.achieved);
        }
    }

    #[test]
    fn test_progress_is_capped_at_100() {
        let tiers = tiers_for_category(BadgeCategory::Explorer, 5000);

        assert!(tiers.iter().all(|t| t.achieved));
        assert!(tiers.iter().all(|t| t.progress_percent == 100.0));
    }

    #[test]
    fn test_ten_restaurant_visits_scenario() {
        let counts = ApprovedCounts {
            total: 10,
            restaurant: 10,
            cafe: 0,
        };
        let badges = compute_badges(&counts);

        let foodie = tiers_of(&badges, BadgeCategory::Foodie);
        assert!(foodie[0].achieved); // threshold 1
        assert!(foodie[1].achieved); // threshold 5
        assert!(foodie[2].achieved); // threshold 10
        assert!(!foodie[3].achieved); // threshold 25
        assert_eq!(foodie[3].progress_percent, 40.0);
        assert!(!foodie[4].achieved); // threshold 50
        assert_eq!(foodie[4].progress_percent, 20.0);

        let coffee = tiers_of(&badges, BadgeCategory::CoffeeLover);
        assert!(coffee.iter().all(|t| !t.achieved));

        // Explorer follows the total, which matches the restaurant count here
        let explorer = tiers_of(&badges, BadgeCategory::Explorer);
        assert!(explorer[2].achieved);
        assert!(!explorer[3].achieved);
    }

    #[test]
    fn test_compute_badges_is_deterministic() {
        let counts = ApprovedCounts {
            total: 7,
            restaurant: 4,
            cafe: 2,
        };
        assert_eq!(compute_badges(&counts), compute_badges(&counts));
    }

    #[tokio::test]
    async fn test_approved_counts_ignore_pending_and_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_member_profile(&db, "alice").await?;
        create_admin_profile(&db, "admin").await?;

        // Two approved restaurant visits, one approved cafe visit
        for _ in 0..2 {
            let s = create_test_submission(&db, "alice", StoreCategory::Restaurant).await?;
            approve_for_test(&db, "admin", s.id).await?;
        }
        let cafe = create_test_submission(&db, "alice", StoreCategory::Cafe).await?;
        approve_for_test(&db, "admin", cafe.id).await?;

        // One left pending, one rejected - neither may count
        create_test_submission(&db, "alice", StoreCategory::Restaurant).await?;
        let rejected = create_test_submission(&db, "alice", StoreCategory::Others).await?;
        reject_for_test(&db, "admin", rejected.id).await?;

        let counts = approved_counts_for_user(&db, "alice").await?;
        assert_eq!(
            counts,
            ApprovedCounts {
                total: 3,
                restaurant: 2,
                cafe: 1,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_badge_progress_for_user_with_no_submissions() -> Result<()> {
        let db = setup_test_db().await?;
        create_member_profile(&db, "bob").await?;

        let badges = badge_progress_for_user(&db, "bob").await?;
        assert_eq!(badges.len(), 15);
        assert!(badges.iter().all(|t| !t.achieved));

        Ok(())
    }
}
