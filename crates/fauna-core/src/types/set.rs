use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, de, ser::SerializeMap};

const SHAPE_ERROR: &str = "set expression must name exactly one operator with its operands";

///
/// SetRef
///
/// Serializable description of a server-side set expression.
/// Never evaluated locally: the tree is opaque to everything except the
/// server and structural equality. Travels as `{"@set": <expression>}`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SetRef {
    #[serde(rename = "@set")]
    expr: Box<SetExpr>,
}

impl SetRef {
    /// Wrap an already-built expression.
    #[must_use]
    pub fn from_expr(expr: SetExpr) -> Self {
        Self {
            expr: Box::new(expr),
        }
    }

    /// Set of index entries whose terms equal `terms`.
    ///
    /// `index` is usually a [`Ref`](crate::types::Ref) but may be any
    /// expression the server resolves to an index.
    #[must_use]
    pub fn matching(terms: impl Into<Value>, index: impl Into<Value>) -> Self {
        Self::from_expr(SetExpr::Match {
            terms: terms.into(),
            index: index.into(),
        })
    }

    /// Elements present in any of `sets`.
    #[must_use]
    pub fn union(sets: impl IntoIterator<Item = Self>) -> Self {
        Self::from_expr(SetExpr::Union(sets.into_iter().collect()))
    }

    /// Elements present in all of `sets`.
    #[must_use]
    pub fn intersection(sets: impl IntoIterator<Item = Self>) -> Self {
        Self::from_expr(SetExpr::Intersection(sets.into_iter().collect()))
    }

    /// Elements of the first set absent from every other set.
    #[must_use]
    pub fn difference(sets: impl IntoIterator<Item = Self>) -> Self {
        Self::from_expr(SetExpr::Difference(sets.into_iter().collect()))
    }

    /// Apply `with` (usually an index ref or lambda) to each element of `source`.
    #[must_use]
    pub fn join(source: Self, with: impl Into<Value>) -> Self {
        Self::from_expr(SetExpr::Join {
            source,
            with: with.into(),
        })
    }

    /// Borrow the expression tree.
    #[must_use]
    pub fn expr(&self) -> &SetExpr {
        &self.expr
    }

    /// Consume the descriptor and return its expression tree.
    #[must_use]
    pub fn into_expr(self) -> SetExpr {
        *self.expr
    }
}

impl From<SetExpr> for SetRef {
    fn from(expr: SetExpr) -> Self {
        Self::from_expr(expr)
    }
}

///
/// SetExpr
///
/// Operator tree of a set descriptor. `Join` is asymmetric: `source` is the
/// input set and `with` is applied to each of its elements.
///

#[derive(Clone, Debug, PartialEq)]
pub enum SetExpr {
    Match { terms: Value, index: Value },
    Union(Vec<SetRef>),
    Intersection(Vec<SetRef>),
    Difference(Vec<SetRef>),
    Join { source: SetRef, with: Value },
}

impl SetExpr {
    /// Wire name of the operator.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Match { .. } => "match",
            Self::Union(_) => "union",
            Self::Intersection(_) => "intersection",
            Self::Difference(_) => "difference",
            Self::Join { .. } => "join",
        }
    }
}

impl Serialize for SetExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Match { terms, index } => {
                map.serialize_entry("match", terms)?;
                map.serialize_entry("index", index)?;
            }
            Self::Union(sets) | Self::Intersection(sets) | Self::Difference(sets) => {
                map.serialize_entry(self.operator(), sets)?;
            }
            Self::Join { source, with } => {
                map.serialize_entry("join", source)?;
                map.serialize_entry("with", with)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SetExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        SetExprWire::deserialize(deserializer)?
            .into_expr()
            .map_err(de::Error::custom)
    }
}

///
/// SetExprWire
/// Flat operator-keyed decode shape; exactly one operator may be populated.
/// Value operands track key presence, so an explicit null is kept.
///

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SetExprWire {
    #[serde(rename = "match", default, deserialize_with = "present")]
    matching: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    index: Option<Value>,
    #[serde(default)]
    union: Option<Vec<SetRef>>,
    #[serde(default)]
    intersection: Option<Vec<SetRef>>,
    #[serde(default)]
    difference: Option<Vec<SetRef>>,
    #[serde(default)]
    join: Option<SetRef>,
    #[serde(default, deserialize_with = "present")]
    with: Option<Value>,
}

// Only called when the key is present; `default` covers the absent case.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SetExprWire {
    // Decode while rejecting mixed or partial operator shapes.
    fn into_expr(self) -> Result<SetExpr, &'static str> {
        match self {
            Self {
                matching: Some(terms),
                index: Some(index),
                union: None,
                intersection: None,
                difference: None,
                join: None,
                with: None,
            } => Ok(SetExpr::Match { terms, index }),
            Self {
                matching: None,
                index: None,
                union: Some(sets),
                intersection: None,
                difference: None,
                join: None,
                with: None,
            } => Ok(SetExpr::Union(sets)),
            Self {
                matching: None,
                index: None,
                union: None,
                intersection: Some(sets),
                difference: None,
                join: None,
                with: None,
            } => Ok(SetExpr::Intersection(sets)),
            Self {
                matching: None,
                index: None,
                union: None,
                intersection: None,
                difference: Some(sets),
                join: None,
                with: None,
            } => Ok(SetExpr::Difference(sets)),
            Self {
                matching: None,
                index: None,
                union: None,
                intersection: None,
                difference: None,
                join: Some(source),
                with: Some(with),
            } => Ok(SetExpr::Join { source, with }),
            _ => Err(SHAPE_ERROR),
        }
    }
}
