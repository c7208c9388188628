mod date;
mod fee;
mod id;

pub use self::{date::*, fee::*, id::*};
use crate::entity::{CustomerId, DailyRentalRate, Document, MovieId};
use crate::{fail, KernelError};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    id: RentalId,
    customer: CustomerId,
    movie: MovieId,
    date_out: DateOut,
    date_returned: Option<DateReturned>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: CustomerId,
        movie: MovieId,
        date_out: DateOut,
        date_returned: Option<DateReturned>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        }
    }

    /// A fresh outstanding rental taken out at `now`.
    pub fn open(customer: CustomerId, movie: MovieId, now: OffsetDateTime) -> Self {
        Self::new(
            RentalId::new(Uuid::new_v4()),
            customer,
            movie,
            DateOut::new(now),
            None,
            None,
        )
    }

    pub fn is_outstanding(&self) -> bool {
        self.date_returned.is_none()
    }

    /// Whole calendar days the movie has been out; partial days round down.
    pub fn rental_days(&self, now: OffsetDateTime) -> i64 {
        (now - *self.date_out.as_ref()).whole_days().max(0)
    }

    pub fn close(
        &self,
        now: OffsetDateTime,
        rate: &DailyRentalRate,
    ) -> error_stack::Result<Self, KernelError> {
        if !self.is_outstanding() {
            return Err(fail(KernelError::Conflict, "return already processed"));
        }
        let fee = RentalFee::calculate(self.rental_days(now), rate);
        Ok(Self {
            date_returned: Some(DateReturned::new(now)),
            rental_fee: Some(fee),
            ..self.clone()
        })
    }
}

impl Document for Rental {
    type Id = RentalId;
    const COLLECTION: &'static str = "rentals";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<String> {
        if self.is_outstanding() {
            vec![format!("outstanding:{}:{}", self.customer, self.movie)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use time::Duration;

    fn rental_out_since(date_out: OffsetDateTime) -> Rental {
        Rental::new(
            RentalId::new(Uuid::new_v4()),
            CustomerId::new(Uuid::new_v4()),
            MovieId::new(Uuid::new_v4()),
            DateOut::new(date_out),
            None,
            None,
        )
    }

    #[test]
    fn seven_days_at_rate_two_costs_fourteen() {
        let now = OffsetDateTime::now_utc();
        let rental = rental_out_since(now - Duration::days(7));
        let closed = rental.close(now, &DailyRentalRate::new(2).unwrap()).unwrap();
        assert_eq!(closed.rental_fee(), &Some(RentalFee::new(14)));
        assert_eq!(closed.date_returned(), &Some(DateReturned::new(now)));
        assert!(!closed.is_outstanding());
    }

    #[test]
    fn same_day_return_is_free() {
        let now = OffsetDateTime::now_utc();
        let rental = rental_out_since(now - Duration::hours(23));
        assert_eq!(rental.rental_days(now), 0);
        let closed = rental.close(now, &DailyRentalRate::new(9).unwrap()).unwrap();
        assert_eq!(closed.rental_fee(), &Some(RentalFee::new(0)));
    }

    #[test]
    fn partial_days_round_down() {
        let now = OffsetDateTime::now_utc();
        let rental = rental_out_since(now - Duration::hours(71));
        assert_eq!(rental.rental_days(now), 2);
    }

    #[test]
    fn closing_twice_conflicts() {
        let now = OffsetDateTime::now_utc();
        let rate = DailyRentalRate::new(1).unwrap();
        let closed = rental_out_since(now).close(now, &rate).unwrap();
        let report = closed.close(now, &rate).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
    }

    #[test]
    fn only_outstanding_rentals_hold_the_pair() {
        let now = OffsetDateTime::now_utc();
        let rental = rental_out_since(now);
        assert_eq!(rental.unique_keys().len(), 1);
        let closed = rental.close(now, &DailyRentalRate::new(1).unwrap()).unwrap();
        assert!(closed.unique_keys().is_empty());
    }

    #[test]
    fn unreturned_fields_serialize_as_null() {
        let rental = rental_out_since(OffsetDateTime::now_utc());
        let value = serde_json::to_value(&rental).unwrap();
        assert!(value["dateReturned"].is_null());
        assert!(value["rentalFee"].is_null());
        assert!(value["dateOut"].is_string());
    }
}
