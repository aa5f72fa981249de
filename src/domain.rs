//! Wire payloads exchanged with the game service.

use alloc::string::String;
use alloc::vec::Vec;

use crate::cell::{CellId, Coordinate};
use crate::player::PlayerId;

/// Body of the game initialization request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct InitRequest {
    pub player_name: String,
    pub opponents: u8,
    pub size: usize,
    /// Ship-occupied coordinates only.
    pub coordinates: Vec<Coordinate>,
}

/// Turn request. The cell id travels in the request URL, there is no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRequest {
    pub cell_id: CellId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRecord {
    pub id: CellId,
    pub coordinate: Coordinate,
    pub flags: u16,
}

/// One player's battlefield as reported by the init response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlefieldRecord {
    /// Server id of the battlefield itself, when sent.
    #[cfg_attr(feature = "std", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<u64>,
    pub player: PlayerRecord,
    /// Sent as an object keyed by index; a plain array is accepted too.
    #[cfg_attr(
        feature = "std",
        serde(
            serialize_with = "wire::serialize_keyed_cells",
            deserialize_with = "wire::deserialize_keyed_cells"
        )
    )]
    pub cells: Vec<CellRecord>,
}

pub type InitResponse = Vec<BattlefieldRecord>;

/// Flag delta for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellDelta {
    #[cfg_attr(feature = "std", serde(deserialize_with = "wire::deserialize_cell_id"))]
    pub id: CellId,
    pub flags: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRef {
    pub id: PlayerId,
}

/// Terminal marker naming the defeated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    pub player: PlayerRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResponse {
    pub cells: Vec<CellDelta>,
    #[cfg_attr(feature = "std", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result: Option<TurnResult>,
}

#[cfg(feature = "std")]
mod wire {
    use std::string::{String, ToString};
    use std::vec::Vec;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::CellRecord;
    use crate::cell::CellId;

    fn cell_record<E: serde::de::Error>(key: &str, value: Value) -> Result<CellRecord, E> {
        serde_json::from_value(value).map_err(|e| E::custom(format!("cell {}: {}", key, e)))
    }

    pub fn deserialize_keyed_cells<'de, D>(deserializer: D) -> Result<Vec<CellRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| cell_record(&key, value))
                .collect(),
            Value::Array(list) => list
                .into_iter()
                .enumerate()
                .map(|(i, value)| cell_record(&i.to_string(), value))
                .collect(),
            other => Err(D::Error::custom(format!(
                "cells must be an object or an array, got {}",
                other
            ))),
        }
    }

    pub fn serialize_keyed_cells<S>(cells: &[CellRecord], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(cells.iter().enumerate().map(|(i, c)| (i.to_string(), c)))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    /// Cell ids in turn responses may arrive as numbers or numeric strings.
    pub fn deserialize_cell_id<'de, D>(deserializer: D) -> Result<CellId, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(CellId(n)),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map(CellId)
                .map_err(|_| D::Error::custom(format!("invalid cell id {:?}", s))),
        }
    }
}
