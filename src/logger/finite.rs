//! Pre-encoding pass that rejects NaN and infinite floats.
//!
//! serde_json silently writes non-finite floats as `null`. A record carrying
//! one must fall back instead, so items are walked once with this
//! serializer before conversion. Nothing is produced; only floats are
//! inspected.

use serde::ser::{self, Error as _, Serialize};

type CheckResult = Result<(), serde_json::Error>;

/// Fail if any float reachable from `value` is NaN or infinite.
pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> CheckResult {
    value.serialize(FiniteCheck)
}

fn check_float(v: f64) -> CheckResult {
    if v.is_finite() {
        Ok(())
    } else {
        Err(serde_json::Error::custom(format!("unsupported value: {v}")))
    }
}

struct FiniteCheck;

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> CheckResult {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> CheckResult {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> CheckResult {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> CheckResult {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> CheckResult {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> CheckResult {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> CheckResult {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> CheckResult {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> CheckResult {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> CheckResult {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> CheckResult {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> CheckResult {
        check_float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> CheckResult {
        check_float(v)
    }

    fn serialize_char(self, _v: char) -> CheckResult {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> CheckResult {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> CheckResult {
        Ok(())
    }

    fn serialize_none(self) -> CheckResult {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> CheckResult {
        value.serialize(self)
    }

    fn serialize_unit(self) -> CheckResult {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> CheckResult {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> CheckResult {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> CheckResult {
        key.serialize(FiniteCheck)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> CheckResult {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        readings: Vec<f32>,
        limit: Option<f64>,
    }

    #[test]
    fn test_finite_values_pass() {
        assert!(ensure_finite(&json!({"ratio": 0.5, "tags": ["a", "b"], "n": null})).is_ok());
        assert!(ensure_finite(&Sample {
            name: "disk",
            readings: vec![1.0, -2.5],
            limit: Some(f64::MAX),
        })
        .is_ok());
    }

    #[test]
    fn test_non_finite_rejected_at_any_depth() {
        let mut flat = BTreeMap::new();
        flat.insert("ratio", f64::NAN);
        assert!(ensure_finite(&flat).is_err());

        let nested = Sample {
            name: "disk",
            readings: vec![1.0, f32::NEG_INFINITY],
            limit: None,
        };
        assert!(ensure_finite(&nested).is_err());

        let optional = Sample {
            name: "disk",
            readings: Vec::new(),
            limit: Some(f64::INFINITY),
        };
        let err = ensure_finite(&optional).unwrap_err();
        assert!(err.to_string().contains("unsupported value: inf"));
    }
}
