use crate::{
    types::{Ref, SetExpr, SetRef},
    value::Value,
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};
use std::{collections::BTreeMap, fmt};

// Reserved tag keys. Objects carrying any `@`-prefixed key are escaped
// under OBJ_TAG so the reader never confuses them with a special form.
const REF_TAG: &str = "@ref";
const SET_TAG: &str = "@set";
const OBJ_TAG: &str = "@obj";

fn needs_escape(map: &BTreeMap<String, Value>) -> bool {
    map.keys().any(|key| key.starts_with('@'))
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(map) if needs_escape(map) => {
                let mut outer = serializer.serialize_map(Some(1))?;
                outer.serialize_entry(OBJ_TAG, map)?;
                outer.end()
            }
            Self::Object(map) => map.serialize(serializer),
            Self::Ref(r) => r.serialize(serializer),
            Self::Set(set) => set.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

///
/// ValueVisitor
/// Decodes plain JSON shapes and unwraps reserved tag envelopes.
///

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a protocol value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer {v} is out of range for i64")))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }

        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(first) = map.next_key::<String>()? else {
            return Ok(Value::Object(BTreeMap::new()));
        };

        let tagged = match first.as_str() {
            REF_TAG => Some(Value::Ref(Ref::new(map.next_value::<String>()?))),
            SET_TAG => Some(Value::Set(SetRef::from_expr(map.next_value::<SetExpr>()?))),
            OBJ_TAG => Some(Value::Object(
                map.next_value::<BTreeMap<String, Value>>()?,
            )),
            _ => None,
        };

        if let Some(value) = tagged {
            if map.next_key::<IgnoredAny>()?.is_some() {
                return Err(de::Error::custom(format!(
                    "reserved key '{first}' must be the only key in its object"
                )));
            }

            return Ok(value);
        }

        let mut entries = BTreeMap::new();
        entries.insert(first, map.next_value::<Value>()?);
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }

        Ok(Value::Object(entries))
    }
}
