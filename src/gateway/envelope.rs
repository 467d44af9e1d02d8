//! Normalisation of list response shapes.
//!
//! The backend answers list endpoints either with a paginated envelope
//! (`{ "bookings": { "data": [...], "current_page": 1, "last_page": 3 } }`)
//! or with a bare array. Each endpoint declares its [`ListShape`] once and
//! callers only ever see a [`FetchResult`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::FetchError;

/// One decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub page: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
}

impl<T> FetchResult<T> {
    /// The backend has no page after this one.
    pub fn is_last(&self) -> bool {
        self.current_page >= self.last_page
    }
}

/// Declared response shape of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// A bare JSON array, or a `{data, current_page, last_page}` object.
    Bare,
    /// Either of the above nested under `key`.
    Enveloped(&'static str),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Paginated {
        data: Vec<T>,
        #[serde(default = "first_page")]
        current_page: u32,
        #[serde(default = "first_page")]
        last_page: u32,
    },
    Bare(Vec<T>),
}

fn first_page() -> u32 {
    1
}

impl ListShape {
    /// Decode a list response body into one canonical page.
    ///
    /// A missing envelope key falls through to the body itself, and a `null`
    /// body is an empty last page.
    pub fn decode<T: DeserializeOwned>(&self, body: Value) -> Result<FetchResult<T>, FetchError> {
        let inner = match self {
            ListShape::Enveloped(key) => match body {
                Value::Object(mut map) if map.contains_key(*key) => {
                    map.remove(*key).unwrap_or(Value::Null)
                }
                other => other,
            },
            ListShape::Bare => body,
        };

        if inner.is_null() {
            return Ok(FetchResult {
                page: Vec::new(),
                current_page: 1,
                last_page: 1,
            });
        }

        let decoded: PageBody<T> =
            serde_json::from_value(inner).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(match decoded {
            PageBody::Paginated {
                data,
                current_page,
                last_page,
            } => FetchResult {
                page: data,
                current_page,
                last_page,
            },
            PageBody::Bare(items) => FetchResult {
                page: items,
                current_page: 1,
                last_page: 1,
            },
        })
    }
}

/// Decode a single entity returned by a mutation.
///
/// Accepts the entity itself or the entity wrapped as `{ "data": ... }`.
pub fn decode_entity<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    match serde_json::from_value::<T>(body.clone()) {
        Ok(entity) => Ok(entity),
        Err(direct) => match body {
            Value::Object(mut map) if map.contains_key("data") => {
                let data = map.remove("data").unwrap_or(Value::Null);
                serde_json::from_value(data).map_err(|e| FetchError::Decode(e.to_string()))
            }
            _ => Err(FetchError::Decode(direct.to_string())),
        },
    }
}
