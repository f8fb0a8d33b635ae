//! Forgiving deserializers for host-supplied options.
//!
//! Hosts pass loosely typed dictionaries. A value of the wrong type, or an
//! enum name this crate does not know, reads as absent instead of failing the
//! whole request.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Ignored(IgnoredAny),
}

/// `deserialize_with` helper: `Some(value)` when it parses as `T`, `None` otherwise.
///
/// # Errors
/// Only fails when the input itself is not valid for the deserializer.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => Some(value),
        Lenient::Ignored(_) => None,
    })
}
