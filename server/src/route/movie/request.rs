use application::transfer::{CreateMovieDto, ListDocumentsDto, UpdateDocumentDto, UpdateMovieDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    title: String,
    genre: Uuid,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    title: Option<String>,
    genre: Option<Uuid>,
    number_in_stock: Option<i32>,
    daily_rental_rate: Option<i32>,
}

/// Best rated movies first, reduced to the fields a storefront shows.
#[derive(Debug)]
pub struct TopMoviesRequest {
    params: Vec<(String, String)>,
}

impl TopMoviesRequest {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }
}

impl Intake<CreateMovieRequest> for Transformer {
    type To = CreateMovieDto;
    fn emit(&self, input: CreateMovieRequest) -> Self::To {
        CreateMovieDto {
            title: input.title,
            genre: input.genre,
            number_in_stock: input.number_in_stock,
            daily_rental_rate: input.daily_rental_rate,
        }
    }
}

impl Intake<(Uuid, UpdateMovieRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateMovieDto>;
    fn emit(&self, input: (Uuid, UpdateMovieRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateMovieDto {
                title: input.title,
                genre: input.genre,
                number_in_stock: input.number_in_stock,
                daily_rental_rate: input.daily_rental_rate,
            },
        }
    }
}

impl Intake<TopMoviesRequest> for Transformer {
    type To = ListDocumentsDto;
    fn emit(&self, input: TopMoviesRequest) -> Self::To {
        ListDocumentsDto::new(input.params)
            .with("limit", "5")
            // Highest average rating first. Equal averages rank the movie with
            // more reviews higher, so a single 5-star review cannot top a
            // hundred 5-star reviews.
            .with("sort", "-ratingsAverage,-ratingsQuantity")
            .with("fields", "title,numberInStock,dailyRentalRate,ratingsAverage")
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::descriptor::{Projection, QueryDescriptor, ReservedKeys};

    use super::TopMoviesRequest;
    use crate::controller::Intake;
    use crate::request::Transformer;

    #[test]
    fn top_movies_presets_override_request() {
        let dto = Transformer.emit(TopMoviesRequest::new(vec![(
            "limit".to_string(),
            "50".to_string(),
        )]));
        let descriptor = QueryDescriptor::build(dto.params, &ReservedKeys::default()).unwrap();
        assert_eq!(descriptor.take(), 5);
        assert_eq!(descriptor.sort().len(), 2);
        assert!(matches!(
            descriptor.projection(),
            Projection::Include(fields) if fields.len() == 4
        ));
    }
}
