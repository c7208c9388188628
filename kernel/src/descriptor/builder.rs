use std::collections::HashSet;

use crate::descriptor::{
    Comparison, FieldFilter, FieldName, FilterValue, Limit, Page, Pagination, Projection,
    QueryDescriptor, SortKey,
};
use crate::{fail, KernelError};

pub const PAGE_KEY: &str = "page";
pub const SORT_KEY: &str = "sort";
pub const LIMIT_KEY: &str = "limit";
pub const FIELDS_KEY: &str = "fields";

/// Parameter names that steer the query instead of filtering documents.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReservedKeys(HashSet<String>);

impl ReservedKeys {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self::new([PAGE_KEY, SORT_KEY, LIMIT_KEY, FIELDS_KEY])
    }
}

impl QueryDescriptor {
    /// Translates raw request parameters.
    ///
    /// Reserved keys configure paging, ordering and projection (the last
    /// occurrence wins). Every other key filters on the field of the same
    /// name; `field[op]` selects one of `gte`, `gt`, `lte`, `lt`.
    pub fn build<I, K, V>(
        params: I,
        reserved: &ReservedKeys,
    ) -> error_stack::Result<Self, KernelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Vec::new();
        let mut sort = Vec::new();
        let mut projection = Projection::default();
        let mut page = Page::default();
        let mut limit = Limit::default();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            if reserved.contains(key) {
                match key {
                    PAGE_KEY => page = Page::parse(value)?,
                    LIMIT_KEY => limit = Limit::parse(value)?,
                    SORT_KEY => sort = SortKey::parse_list(value)?,
                    FIELDS_KEY => projection = Projection::parse(value)?,
                    _ => {}
                }
                continue;
            }
            filters.push(parse_filter(key, value)?);
        }

        Ok(Self::new(
            filters,
            sort,
            projection,
            Pagination::new(page, limit),
        ))
    }
}

fn parse_filter(key: &str, value: &str) -> error_stack::Result<FieldFilter, KernelError> {
    let (field, comparison) = match key.split_once('[') {
        Some((field, rest)) => {
            let operator = rest.strip_suffix(']').ok_or_else(|| {
                fail(
                    KernelError::Validation,
                    format!("malformed filter key `{key}`"),
                )
            })?;
            (field, Comparison::from_operator(operator)?)
        }
        None => (key, Comparison::Eq),
    };
    Ok(FieldFilter::new(
        FieldName::new(field)?,
        comparison,
        FilterValue::parse(value),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::descriptor::SortDirection;
    use serde_json::json;

    fn build(params: &[(&str, &str)]) -> error_stack::Result<QueryDescriptor, KernelError> {
        QueryDescriptor::build(params.iter().copied(), &ReservedKeys::default())
    }

    #[test]
    fn range_filter_with_sort_and_paging() {
        let descriptor = build(&[
            ("price[gte]", "10"),
            ("price[lte]", "200"),
            ("sort", "-price"),
            ("page", "2"),
            ("limit", "5"),
        ])
        .unwrap();

        let price = FieldName::new("price").unwrap();
        assert_eq!(
            descriptor.filters(),
            &vec![
                FieldFilter::new(price.clone(), Comparison::Gte, FilterValue::parse("10")),
                FieldFilter::new(price.clone(), Comparison::Lte, FilterValue::parse("200")),
            ]
        );
        assert_eq!(
            descriptor.sort(),
            &vec![SortKey::new(price, SortDirection::Descending)]
        );
        assert_eq!(descriptor.skip(), 5);
        assert_eq!(descriptor.take(), 5);
        assert!(descriptor.matches(&json!({ "price": 150 })));
        assert!(!descriptor.matches(&json!({ "price": 201 })));
    }

    #[test]
    fn empty_request_uses_defaults() {
        let descriptor = build(&[]).unwrap();
        assert!(descriptor.filters().is_empty());
        assert_eq!(descriptor.sort(), &vec![SortKey::newest_first()]);
        assert_eq!(descriptor.projection(), &Projection::All);
        assert_eq!(descriptor.skip(), 0);
        assert_eq!(descriptor.take(), 100);
        assert_eq!(descriptor, QueryDescriptor::default());
    }

    #[test]
    fn unknown_operator_is_a_validation_error() {
        let report = build(&[("price[ne]", "3")]).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        assert!(build(&[("price[]", "3")]).is_err());
        assert!(build(&[("price[gte", "3")]).is_err());
    }

    #[test]
    fn field_names_are_sanitised() {
        assert!(build(&[("$where", "1")]).is_err());
        assert!(build(&[("sort", "title,-$natural")]).is_err());
    }

    #[test]
    fn fields_select_a_projection() {
        let descriptor = build(&[("fields", "title,dailyRentalRate")]).unwrap();
        assert_eq!(
            descriptor.projection(),
            &Projection::Include(vec![
                FieldName::new("title").unwrap(),
                FieldName::new("dailyRentalRate").unwrap(),
            ])
        );
    }

    #[test]
    fn custom_reserved_keys_turn_the_rest_into_filters() {
        let reserved = ReservedKeys::new([PAGE_KEY, LIMIT_KEY]);
        let descriptor =
            QueryDescriptor::build([("sort", "title"), ("limit", "3")], &reserved).unwrap();
        assert_eq!(descriptor.filters().len(), 1);
        assert_eq!(descriptor.sort(), &vec![SortKey::newest_first()]);
        assert_eq!(descriptor.take(), 3);
    }

    #[test]
    fn page_past_the_end_is_not_an_error() {
        let descriptor = build(&[("page", "1000"), ("limit", "1000")]).unwrap();
        assert_eq!(descriptor.skip(), 999_000);
    }
}
