use crate::{error::Error, types::Ref, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// EventAction
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Create,
    Delete,
}

impl EventAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            other => Err(Error::invalid_query(format!(
                "event action must be 'create', 'delete', or unset, got '{other}'"
            ))),
        }
    }
}

///
/// Event
///
/// Timestamped create/delete notification for one resource.
/// Events are never decoded implicitly; use [`Event::from_value`] on a
/// fragment known to describe one.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "EventWire")]
pub struct Event {
    /// Microsecond UNIX timestamp at which the event occurred.
    ts: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<EventAction>,

    /// The affected instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<Ref>,
}

impl Event {
    /// Build an event, validating `action` against the closed action set.
    pub fn new(ts: i64, action: Option<&str>, resource: Option<Ref>) -> Result<Self, Error> {
        let action: Option<EventAction> = action.map(str::parse).transpose()?;

        Ok(Self::with_action(ts, action, resource))
    }

    /// Build an event from an already-typed action.
    #[must_use]
    pub const fn with_action(ts: i64, action: Option<EventAction>, resource: Option<Ref>) -> Self {
        Self {
            ts,
            action,
            resource,
        }
    }

    /// Decode an event from a response fragment.
    ///
    /// Shape failures classify as serialize errors; an unknown action is
    /// still reported as an invalid query.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let wire: EventWire = serde_json::from_value(serde_json::to_value(value)?)?;

        Self::try_from(wire)
    }

    #[must_use]
    pub const fn ts(&self) -> i64 {
        self.ts
    }

    #[must_use]
    pub const fn action(&self) -> Option<EventAction> {
        self.action
    }

    #[must_use]
    pub const fn resource(&self) -> Option<&Ref> {
        self.resource.as_ref()
    }
}

///
/// EventWire
/// Decode shape that keeps `action` untyped until validation.
///

#[derive(Deserialize)]
struct EventWire {
    ts: i64,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    resource: Option<Ref>,
}

impl TryFrom<EventWire> for Event {
    type Error = Error;

    fn try_from(wire: EventWire) -> Result<Self, Self::Error> {
        Self::new(wire.ts, wire.action.as_deref(), wire.resource)
    }
}
