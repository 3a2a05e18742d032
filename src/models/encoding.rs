use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer};

pub fn bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value {
        Some(encoded) => STANDARD.decode(encoded).map_err(de::Error::custom),
        None => Ok(Vec::new())
    }
}

pub fn bytes_list<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();

    values.into_iter()
        .map(|encoded| STANDARD.decode(encoded).map_err(de::Error::custom))
        .collect()
}
