//! Ready-made deserializers for [`FixtureLoader::with_deserializer`][crate::FixtureLoader::with_deserializer]

use std::io::Read;

/// Read the whole stream as UTF-8 text
pub fn text(reader: &mut dyn Read) -> std::io::Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Read the whole stream as raw bytes
pub fn bytes(reader: &mut dyn Read) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Parse the stream as json
///
/// ```rust
/// # use fixsnap::deserialize;
/// let mut reader = &br#"{"answer": 42}"#[..];
/// let value: serde_json::Value = deserialize::json(&mut reader).unwrap();
/// assert_eq!(value["answer"], 42);
/// ```
#[cfg(feature = "json")]
pub fn json<T: serde::de::DeserializeOwned>(reader: &mut dyn Read) -> serde_json::Result<T> {
    serde_json::from_reader(reader)
}
