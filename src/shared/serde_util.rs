//! Custom serde helpers for backend wire formats.

/// Money amounts as JSON numbers.
///
/// The backend stores prices as plain JS numbers (`"price": 1000`), but older
/// records and form posts carry them as strings (`"price": "1000"`). Both are
/// accepted; amounts are always written back as numbers.
pub mod decimal_number {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.fract().is_zero() {
            if let Some(int) = value.to_i64() {
                return serializer.serialize_i64(int);
            }
        }
        let float = value
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom(format!("Unrepresentable amount: {}", value)))?;
        serializer.serialize_f64(float)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            if !v.is_finite() {
                return Err(E::custom(format!("Invalid amount: {}", v)));
            }
            Decimal::from_str(&v.to_string()).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(Decimal::ZERO);
            }
            Decimal::from_str(trimmed)
                .or_else(|_| Decimal::from_scientific(trimmed))
                .map_err(|_| E::custom(format!("Invalid amount: {:?}", v)))
        }
    }
}

/// Optional variant of [`decimal_number`]: `null` and missing fields become `None`.
pub mod option_decimal_number {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::decimal_number::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::decimal_number")] Decimal);

        let wrapped: Option<Wrapper> = Option::deserialize(deserializer)?;
        Ok(wrapped.map(|Wrapper(d)| d))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "super::decimal_number")]
        price: Decimal,
        #[serde(default, with = "super::option_decimal_number")]
        final_price: Option<Decimal>,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let p: Priced = serde_json::from_str(r#"{"price": 1000}"#).unwrap();
        assert_eq!(p.price, dec!(1000));
        assert_eq!(p.final_price, None);

        let p: Priced = serde_json::from_str(r#"{"price": "249.50", "final_price": 199.6}"#).unwrap();
        assert_eq!(p.price, dec!(249.50));
        assert_eq!(p.final_price, Some(dec!(199.6)));
    }

    #[test]
    fn test_null_optional_is_none() {
        let p: Priced = serde_json::from_str(r#"{"price": 5, "final_price": null}"#).unwrap();
        assert_eq!(p.final_price, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": true}"#).is_err());
    }

    #[test]
    fn test_writes_numbers() {
        let p = Priced {
            price: dec!(2400),
            final_price: Some(dec!(19.99)),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["price"], serde_json::json!(2400));
        assert_eq!(json["final_price"], serde_json::json!(19.99));
    }
}
