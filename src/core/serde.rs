/// Serde helper functions for custom serialization/deserialization
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `Option<ProcessorId>` the way clients expect it: `-1` when the
/// process holds no processor, the processor index otherwise.
pub mod processor_slot {
    use super::*;
    use crate::core::types::ProcessorId;

    pub fn serialize<S>(slot: &Option<ProcessorId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match slot {
            Some(id) => serializer.serialize_i64(*id as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ProcessorId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(None)
        } else {
            Ok(Some(raw as ProcessorId))
        }
    }
}

/// Accept `null` for a collection field and treat it as empty
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
