use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// First column of the station directory output.
pub const STATION_ID_COLUMN: &str = "station_id";

/// 站點屬性：固定的 name / latitude / longitude 以及其他從表頭發現的屬性
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationAttribute {
    Name,
    Latitude,
    Longitude,
    Other(String),
}

impl StationAttribute {
    pub fn from_key(key: &str) -> Self {
        match key {
            "name" => StationAttribute::Name,
            "latitude" => StationAttribute::Latitude,
            "longitude" => StationAttribute::Longitude,
            other => StationAttribute::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StationAttribute::Name => "name",
            StationAttribute::Latitude => "latitude",
            StationAttribute::Longitude => "longitude",
            StationAttribute::Other(key) => key.as_str(),
        }
    }
}

/// Consolidated metadata for one station. A slot holding `Some` has been
/// filled and is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationRecord {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl StationRecord {
    /// First-write-wins. Empty values are ignored; returns whether the value
    /// was stored.
    pub fn record(&mut self, attribute: &StationAttribute, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }

        let slot = match attribute {
            StationAttribute::Name => &mut self.name,
            StationAttribute::Latitude => &mut self.latitude,
            StationAttribute::Longitude => &mut self.longitude,
            StationAttribute::Other(key) => {
                if self.extra.contains_key(key) {
                    return false;
                }
                self.extra.insert(key.clone(), value.to_string());
                return true;
            }
        };

        if slot.is_some() {
            return false;
        }
        *slot = Some(value.to_string());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match StationAttribute::from_key(key) {
            StationAttribute::Name => self.name.as_deref(),
            StationAttribute::Latitude => self.latitude.as_deref(),
            StationAttribute::Longitude => self.longitude.as_deref(),
            StationAttribute::Other(key) => self.extra.get(&key).map(String::as_str),
        }
    }

    /// 已填入的屬性名稱
    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        let fixed = [
            ("name", &self.name),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
        ];
        fixed
            .into_iter()
            .filter(|(_, value)| value.is_some())
            .map(|(key, _)| key)
            .chain(self.extra.keys().map(String::as_str))
    }
}

/// Station directory keyed by identifier. Iteration follows string order of
/// the identifiers.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: BTreeMap<String, StationRecord>,
}

impl StationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得站點記錄，不存在時建立空白記錄
    pub fn observe(&mut self, station_id: &str) -> &mut StationRecord {
        self.stations.entry(station_id.to_string()).or_default()
    }

    pub fn get(&self, station_id: &str) -> Option<&StationRecord> {
        self.stations.get(station_id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StationRecord)> {
        self.stations.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// 輸出欄位：`station_id` 之後接所有站點屬性的聯集 (字典序)
    pub fn columns(&self) -> Vec<String> {
        let keys: BTreeSet<&str> = self
            .stations
            .values()
            .flat_map(|record| record.attribute_keys())
            .collect();

        std::iter::once(STATION_ID_COLUMN)
            .chain(keys)
            .map(str::to_string)
            .collect()
    }
}

fn zero_duration() -> String {
    "0".to_string()
}

/// 彙總時保留在記憶體中的行程欄位，缺少的欄位視為空字串
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TripLeg {
    #[serde(default)]
    pub start_station_id: String,
    #[serde(default)]
    pub start_station_name: String,
    #[serde(default)]
    pub start_lat: String,
    #[serde(default)]
    pub start_lng: String,
    #[serde(default)]
    pub end_station_id: String,
    #[serde(default)]
    pub end_station_name: String,
    #[serde(default)]
    pub end_lat: String,
    #[serde(default)]
    pub end_lng: String,
    #[serde(default)]
    pub rideable_type: String,
    /// Missing column counts as zero minutes; an empty value does not parse.
    #[serde(default = "zero_duration")]
    pub duration_minutes: String,
}

impl TripLeg {
    pub fn duration(&self) -> Option<f64> {
        self.duration_minutes.trim().parse().ok()
    }
}
