use kernel::prelude::entity::{
    DailyRentalRate, DocumentId, GenreId, Movie, MovieId, MoviePatch, MovieTitle, NumberInStock,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{DocumentChanges, DocumentDraft};

#[derive(Debug, Clone)]
pub struct CreateMovieDto {
    pub title: String,
    pub genre: Uuid,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

impl DocumentDraft for CreateMovieDto {
    type Document = Movie;

    fn into_document(self, id: MovieId) -> error_stack::Result<Movie, KernelError> {
        Ok(Movie::new(
            id,
            MovieTitle::new(self.title)?,
            GenreId::from_uuid(self.genre),
            NumberInStock::new(self.number_in_stock)?,
            DailyRentalRate::new(self.daily_rental_rate)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMovieDto {
    pub title: Option<String>,
    pub genre: Option<Uuid>,
    pub number_in_stock: Option<i32>,
    pub daily_rental_rate: Option<i32>,
}

impl DocumentChanges for UpdateMovieDto {
    type Document = Movie;

    fn into_patch(self) -> error_stack::Result<MoviePatch, KernelError> {
        Ok(MoviePatch {
            title: self.title.map(MovieTitle::new).transpose()?,
            genre: self.genre.map(GenreId::from_uuid),
            number_in_stock: self.number_in_stock.map(NumberInStock::new).transpose()?,
            daily_rental_rate: self
                .daily_rental_rate
                .map(DailyRentalRate::new)
                .transpose()?,
        })
    }
}

/// The movie as embedded in a rental response.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: i32,
    pub ratings_average: f64,
    pub ratings_quantity: i64,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: *movie.id().as_ref(),
            title: movie.title().as_ref().clone(),
            daily_rental_rate: *movie.daily_rental_rate().as_ref(),
            ratings_average: *movie.ratings_average().as_ref(),
            ratings_quantity: *movie.ratings_quantity().as_ref(),
        }
    }
}
