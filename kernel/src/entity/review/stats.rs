use vodca::References;

use crate::entity::Rating;

/// Aggregate of every review written for one movie.
#[derive(Debug, Clone, PartialEq, References)]
pub struct RatingStats {
    quantity: i64,
    average: f64,
}

impl RatingStats {
    pub fn new(quantity: i64, average: f64) -> Self {
        Self { quantity, average }
    }

    /// `None` when there is nothing to aggregate.
    pub fn collect<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Option<Self> {
        let (quantity, sum) = ratings
            .into_iter()
            .fold((0_i64, 0_i64), |(quantity, sum), rating| {
                (quantity + 1, sum + i64::from(*rating.as_ref()))
            });
        (quantity > 0).then(|| Self::new(quantity, sum as f64 / quantity as f64))
    }
}
