use std::cmp::Ordering;

use serde_json::Value;
use vodca::References;

use crate::descriptor::FieldName;
use crate::{fail, KernelError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Comparison {
    Eq,
    Gte,
    Gt,
    Lte,
    Lt,
}

impl Comparison {
    pub fn from_operator(operator: &str) -> error_stack::Result<Self, KernelError> {
        match operator {
            "gte" => Ok(Self::Gte),
            "gt" => Ok(Self::Gt),
            "lte" => Ok(Self::Lte),
            "lt" => Ok(Self::Lt),
            _ => Err(fail(
                KernelError::Validation,
                format!("unsupported filter operator `{operator}`"),
            )),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Lt => "<",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Gte => ordering != Ordering::Less,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lte => ordering != Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
        }
    }
}

/// A request value, kept both as the raw text and as the JSON value it
/// most likely denotes.
#[derive(Debug, Clone, PartialEq, References)]
pub struct FilterValue {
    raw: String,
    typed: Value,
}

impl FilterValue {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let typed = match raw.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            text => text
                .parse::<i64>()
                .map(Value::from)
                .ok()
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                })
                .unwrap_or_else(|| Value::String(raw.clone())),
        };
        Self { raw, typed }
    }
}

#[derive(Debug, Clone, PartialEq, References)]
pub struct FieldFilter {
    field: FieldName,
    comparison: Comparison,
    value: FilterValue,
}

impl FieldFilter {
    pub fn new(field: FieldName, comparison: Comparison, value: FilterValue) -> Self {
        Self {
            field,
            comparison,
            value,
        }
    }

    /// Evaluates the filter against a stored document body. Values of
    /// different JSON types never match, except that equality also accepts
    /// the raw request text against a string field.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(candidate) = document.get(self.field.as_ref()) else {
            return false;
        };
        if self.comparison == Comparison::Eq {
            if let Value::String(text) = candidate {
                if text == &self.value.raw {
                    return true;
                }
            }
        }
        compare(candidate, &self.value.typed)
            .map(|ordering| self.comparison.accepts(ordering))
            .unwrap_or(false)
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64()?.partial_cmp(&right.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn filter(field: &str, comparison: Comparison, raw: &str) -> FieldFilter {
        FieldFilter::new(
            FieldName::new(field).unwrap(),
            comparison,
            FilterValue::parse(raw),
        )
    }

    #[test]
    fn values_are_typed_on_parse() {
        assert_eq!(FilterValue::parse("10").typed(), &json!(10));
        assert_eq!(FilterValue::parse("2.5").typed(), &json!(2.5));
        assert_eq!(FilterValue::parse("true").typed(), &json!(true));
        assert_eq!(FilterValue::parse("Comedy").typed(), &json!("Comedy"));
        assert_eq!(FilterValue::parse("NaN").typed(), &json!("NaN"));
    }

    #[test]
    fn comparisons_on_numbers() {
        let doc = json!({ "price": 120 });
        assert!(filter("price", Comparison::Gte, "10").matches(&doc));
        assert!(filter("price", Comparison::Lte, "120").matches(&doc));
        assert!(!filter("price", Comparison::Lt, "120").matches(&doc));
        assert!(!filter("price", Comparison::Gt, "200").matches(&doc));
        assert!(filter("price", Comparison::Eq, "120").matches(&doc));
    }

    #[test]
    fn equality_falls_back_to_raw_text() {
        let doc = json!({ "phone": "12345", "isGold": false });
        assert!(filter("phone", Comparison::Eq, "12345").matches(&doc));
        assert!(filter("isGold", Comparison::Eq, "false").matches(&doc));
        assert!(!filter("phone", Comparison::Gt, "12345").matches(&doc));
    }

    #[test]
    fn missing_field_never_matches() {
        let doc = json!({ "title": "Heat" });
        assert!(!filter("price", Comparison::Eq, "1").matches(&doc));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let report = Comparison::from_operator("regex").unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        assert!(Comparison::from_operator("eq").is_err());
    }
}
