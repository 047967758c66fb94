use serde::de::DeserializeOwned;

use crate::error::{Result, SchemaGenError};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    deserialize_with_path(de)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    deserialize_with_path(de)
}

fn deserialize_with_path<'de, R, T>(de: &mut serde_json::Deserializer<R>) -> Result<T>
where
    R: serde_json::de::Read<'de>,
    T: DeserializeOwned,
{
    let value = serde_path_to_error::deserialize::<_, T>(&mut *de).map_err(|err| {
        let path = err.path().to_string();
        SchemaGenError::InvalidInput(format!("at JSON path {path} → {}", err.into_inner()))
    })?;
    // trailing characters after the document
    de.end().map_err(|err| SchemaGenError::InvalidInput(err.to_string()))?;
    Ok(value)
}
