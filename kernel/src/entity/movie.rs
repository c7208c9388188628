mod id;
mod rate;
mod rating;
mod stock;
mod title;

pub use self::{id::*, rate::*, rating::*, stock::*, title::*};
use crate::entity::{Document, GenreId, Patchable, RatingStats, Slug};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    slug: Slug,
    genre: GenreId,
    number_in_stock: NumberInStock,
    daily_rental_rate: DailyRentalRate,
    ratings_average: RatingsAverage,
    ratings_quantity: RatingsQuantity,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        genre: GenreId,
        number_in_stock: NumberInStock,
        daily_rental_rate: DailyRentalRate,
    ) -> Self {
        Self {
            id,
            slug: Slug::from_text(title.as_ref()),
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
            ratings_average: RatingsAverage::default(),
            ratings_quantity: RatingsQuantity::default(),
        }
    }

    pub fn is_in_stock(&self) -> bool {
        !self.number_in_stock.is_empty()
    }

    /// Takes one copy off the shelf. Returns `false` and leaves the movie
    /// untouched when nothing is in stock.
    pub fn check_out(&mut self) -> bool {
        match self.number_in_stock.decremented() {
            Some(stock) => {
                self.number_in_stock = stock;
                true
            }
            None => false,
        }
    }

    /// Puts one copy back. Returns `false` and leaves the movie untouched
    /// when the shelf is already full.
    pub fn check_in(&mut self) -> bool {
        match self.number_in_stock.incremented() {
            Some(stock) => {
                self.number_in_stock = stock;
                true
            }
            None => false,
        }
    }

    pub fn apply_ratings(&mut self, stats: Option<&RatingStats>) {
        match stats {
            Some(stats) => {
                self.ratings_average = RatingsAverage::new(*stats.average());
                self.ratings_quantity = RatingsQuantity::new(*stats.quantity());
            }
            None => {
                self.ratings_average = RatingsAverage::default();
                self.ratings_quantity = RatingsQuantity::default();
            }
        }
    }
}

impl Document for Movie {
    type Id = MovieId;
    const COLLECTION: &'static str = "movies";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<MovieTitle>,
    pub genre: Option<GenreId>,
    pub number_in_stock: Option<NumberInStock>,
    pub daily_rental_rate: Option<DailyRentalRate>,
}

impl Patchable for Movie {
    type Patch = MoviePatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(title) = patch.title {
            self.slug = Slug::from_text(title.as_ref());
            self.title = title;
            written.extend(["title", "slug"]);
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
            written.push("genre");
        }
        if let Some(stock) = patch.number_in_stock {
            self.number_in_stock = stock;
            written.push("numberInStock");
        }
        if let Some(rate) = patch.daily_rental_rate {
            self.daily_rental_rate = rate;
            written.push("dailyRentalRate");
        }
        written
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use uuid::Uuid;

    fn movie(stock: i32) -> Movie {
        Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("Blade Runner").unwrap(),
            GenreId::new(Uuid::new_v4()),
            NumberInStock::new(stock).unwrap(),
            DailyRentalRate::new(2).unwrap(),
        )
    }

    #[test]
    fn check_out_stops_at_zero() {
        let mut movie = movie(1);
        assert!(movie.check_out());
        assert_eq!(movie.number_in_stock(), &NumberInStock::new(0).unwrap());
        assert!(!movie.check_out());
        assert!(!movie.is_in_stock());
        assert!(movie.check_in());
        assert!(movie.is_in_stock());
    }

    #[test]
    fn check_in_stops_at_capacity() {
        let mut movie = movie(NumberInStock::MAX);
        assert!(!movie.check_in());
        assert_eq!(
            movie.number_in_stock(),
            &NumberInStock::new(NumberInStock::MAX).unwrap()
        );
    }

    #[test]
    fn patching_title_refreshes_slug() {
        let mut movie = movie(3);
        assert_eq!(movie.slug(), &Slug::new("blade-runner"));
        let written = movie.patch(MoviePatch {
            title: Some(MovieTitle::new("Blade Runner 2049").unwrap()),
            ..MoviePatch::default()
        });
        assert_eq!(written, vec!["title", "slug"]);
        assert_eq!(movie.slug(), &Slug::new("blade-runner-2049"));
        assert_eq!(movie.number_in_stock(), &NumberInStock::new(3).unwrap());
    }

    #[test]
    fn document_shape_uses_camel_case() {
        let movie = movie(4);
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["numberInStock"], serde_json::json!(4));
        assert_eq!(value["dailyRentalRate"], serde_json::json!(2));
        assert_eq!(value["ratingsAverage"], serde_json::json!(4.5));
        assert_eq!(value["slug"], serde_json::json!("blade-runner"));
    }
}
