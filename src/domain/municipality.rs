/// Municipality encoded by the first letter of a BlueBikes station id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Municipality {
    Boston,
    Brookline,
    Cambridge,
    Lexington,
    Medford,
    Newton,
    Revere,
    Salem,
    Somerville,
    Watertown,
}

impl Municipality {
    pub fn from_station_id(station_id: &str) -> Option<Self> {
        let prefix = station_id.chars().next()?.to_ascii_uppercase();
        match prefix {
            'A'..='H' => Some(Municipality::Boston),
            'K' => Some(Municipality::Brookline),
            'L' => Some(Municipality::Lexington),
            'M' => Some(Municipality::Cambridge),
            'N' => Some(Municipality::Newton),
            'R' => Some(Municipality::Revere),
            'S' => Some(Municipality::Somerville),
            'T' => Some(Municipality::Salem),
            'V' => Some(Municipality::Medford),
            'W' => Some(Municipality::Watertown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Municipality::Boston => "Boston",
            Municipality::Brookline => "Brookline",
            Municipality::Cambridge => "Cambridge",
            Municipality::Lexington => "Lexington",
            Municipality::Medford => "Medford",
            Municipality::Newton => "Newton",
            Municipality::Revere => "Revere",
            Municipality::Salem => "Salem",
            Municipality::Somerville => "Somerville",
            Municipality::Watertown => "Watertown",
        }
    }
}

/// Newton 站點：id 以大寫 `N` 開頭 (逐位元組比較，區分大小寫)
pub fn is_newton_station(station_id: impl AsRef<[u8]>) -> bool {
    station_id.as_ref().first() == Some(&b'N')
}

/// 欄位值用的市鎮名稱，無法辨識時為空字串
pub fn municipality_name(station_id: &str) -> &'static str {
    Municipality::from_station_id(station_id)
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// `"<Municipality>: <name>"`, or the raw name when the id has no known
/// municipality or the name is empty.
pub fn display_name(station_id: &str, station_name: &str) -> String {
    if station_name.is_empty() {
        return String::new();
    }
    match Municipality::from_station_id(station_id) {
        Some(municipality) => format!("{}: {}", municipality.as_str(), station_name),
        None => station_name.to_string(),
    }
}
