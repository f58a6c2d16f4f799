use crate::domain::errors::ValidationError;
use serde_json::{Number, Value};

/// Ordered list of feature names.
/// This order MUST match the column order the scoring model was trained with:
/// the scorer reads argument element N as feature N.
pub const FEATURE_NAMES: [&str; 4] = [
    "actual_price",
    "discount_percentage",
    "rating",
    "rating_count",
];

pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

const ACTUAL_PRICE: usize = 0;
const DISCOUNT_PERCENTAGE: usize = 1;
const RATING: usize = 2;
const RATING_COUNT: usize = 3;

/// Product attributes submitted for one price prediction.
///
/// Immutable once built. Besides the numeric values, the vector keeps the JSON
/// number each value arrived as, so `1200` reaches the scorer as an integer and
/// `100.0` as a float.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
    encoded: [Number; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from plain values.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, ValidationError> {
        let mut encoded = Vec::with_capacity(FEATURE_COUNT);
        for (index, value) in values.iter().enumerate() {
            let number = match index {
                RATING_COUNT if *value >= 0.0 && value.fract() == 0.0 && *value < 1e15 => {
                    Number::from(*value as u64)
                }
                _ => number_from_f64(index, *value)?,
            };
            encoded.push(number);
        }
        Self::build(values, encoded)
    }

    /// Build from the `features` field of a request body.
    ///
    /// Accepts JSON numbers and strings holding a finite number. `None` (field
    /// absent) and non-array values are rejected with `NotAnArray`.
    pub fn from_json(features: Option<&Value>) -> Result<Self, ValidationError> {
        let items = match features {
            Some(Value::Array(items)) => items,
            _ => return Err(ValidationError::NotAnArray),
        };

        if items.len() != FEATURE_COUNT {
            return Err(ValidationError::WrongLength {
                expected: FEATURE_COUNT,
                actual: items.len(),
            });
        }

        let mut values = [0.0; FEATURE_COUNT];
        let mut encoded = Vec::with_capacity(FEATURE_COUNT);
        for (index, item) in items.iter().enumerate() {
            let number = coerce_number(index, item)?;
            values[index] = number.as_f64().ok_or(ValidationError::NotNumeric {
                index,
                name: FEATURE_NAMES[index],
            })?;
            encoded.push(number);
        }

        Self::build(values, encoded)
    }

    fn build(values: [f64; FEATURE_COUNT], encoded: Vec<Number>) -> Result<Self, ValidationError> {
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::NotNumeric {
                    index,
                    name: FEATURE_NAMES[index],
                });
            }
        }

        check_range(ACTUAL_PRICE, values[ACTUAL_PRICE], |v| v >= 0.0, "must be >= 0")?;
        check_range(
            DISCOUNT_PERCENTAGE,
            values[DISCOUNT_PERCENTAGE],
            |v| (0.0..=100.0).contains(&v),
            "must be between 0 and 100 (fraction or percentage)",
        )?;
        check_range(
            RATING,
            values[RATING],
            |v| (0.0..=5.0).contains(&v),
            "must be between 0 and 5",
        )?;
        check_range(
            RATING_COUNT,
            values[RATING_COUNT],
            |v| v >= 0.0 && v.fract() == 0.0,
            "must be a non-negative integer",
        )?;

        let encoded: [Number; FEATURE_COUNT] = encoded
            .try_into()
            .map_err(|rest: Vec<Number>| ValidationError::WrongLength {
                expected: FEATURE_COUNT,
                actual: rest.len(),
            })?;

        Ok(Self { values, encoded })
    }

    pub fn actual_price(&self) -> f64 {
        self.values[ACTUAL_PRICE]
    }

    pub fn discount_percentage(&self) -> f64 {
        self.values[DISCOUNT_PERCENTAGE]
    }

    pub fn rating(&self) -> f64 {
        self.values[RATING]
    }

    pub fn rating_count(&self) -> f64 {
        self.values[RATING_COUNT]
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        self.values
    }

    /// JSON text handed to the scorer as its single argument, e.g.
    /// `[100.0,0.15,4.5,1200]`.
    pub fn to_json_arg(&self) -> String {
        let items: Vec<Value> = self.encoded.iter().cloned().map(Value::Number).collect();
        Value::Array(items).to_string()
    }
}

fn coerce_number(index: usize, item: &Value) -> Result<Number, ValidationError> {
    let not_numeric = || ValidationError::NotNumeric {
        index,
        name: FEATURE_NAMES[index],
    };

    match item {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Number::from(i));
            }
            let f = s.parse::<f64>().map_err(|_| not_numeric())?;
            number_from_f64(index, f)
        }
        _ => Err(not_numeric()),
    }
}

fn number_from_f64(index: usize, value: f64) -> Result<Number, ValidationError> {
    Number::from_f64(value).ok_or(ValidationError::NotNumeric {
        index,
        name: FEATURE_NAMES[index],
    })
}

fn check_range(
    index: usize,
    value: f64,
    ok: impl Fn(f64) -> bool,
    constraint: &'static str,
) -> Result<(), ValidationError> {
    if ok(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            index,
            name: FEATURE_NAMES[index],
            value,
            constraint,
        })
    }
}
