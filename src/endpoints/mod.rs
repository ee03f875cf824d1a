pub mod artists;
pub mod comments;
pub mod songs;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

use crate::client::Netease;
use crate::endpoints::artists::*;
use crate::endpoints::comments::*;
use crate::endpoints::songs::*;

// Endpoint function namespaces

impl Netease {
    pub const fn artists(&self) -> Artists {
        Artists(self)
    }

    pub const fn comments(&self) -> Comments {
        Comments(self)
    }

    pub const fn songs(&self) -> Songs {
        Songs(self)
    }
}

// NetEase sends ids, timestamps and counters as JSON numbers; the domain keeps
// them as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, found {}",
            other
        ))),
    }
}

// Lists the catalog may send as `null` instead of leaving them out.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
