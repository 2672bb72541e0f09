//! Identity and timestamps shared by every entity.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire and storage format for `created_at` / `updated_at`.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl BaseModel {
    /// Fresh identity: random UUID v4, both timestamps set to now.
    pub fn new() -> Self {
        let now = now();
        BaseModel {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. Never moves it backwards, even if the clock does.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.updated_at);
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time at the precision the wire format keeps.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub(crate) mod timestamp {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = BaseModel::new();
        let b = BaseModel::new();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn touch_never_goes_backwards() {
        let mut base = BaseModel::new();
        let before = base.updated_at;
        base.touch();
        assert!(base.updated_at >= before);
        assert_eq!(base.created_at, before);
    }

    #[test]
    fn timestamps_render_with_microseconds() {
        let base = BaseModel {
            id: "abc".into(),
            created_at: NaiveDateTime::parse_from_str("2017-09-28T21:03:54.052298", "%Y-%m-%dT%H:%M:%S%.f").unwrap(),
            updated_at: NaiveDateTime::parse_from_str("2017-09-28T21:03:54.000000", "%Y-%m-%dT%H:%M:%S%.f").unwrap(),
        };
        let json = serde_json::to_value(&base).unwrap();
        assert_eq!(json["created_at"], "2017-09-28T21:03:54.052298");
        assert_eq!(json["updated_at"], "2017-09-28T21:03:54.000000");
        let back: BaseModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, base);
    }
}
