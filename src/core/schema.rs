use crate::domain::model::{StationAttribute, STATION_ID_COLUMN};
use csv::StringRecord;

/// Trip endpoint described by a group of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Start,
    End,
}

impl Role {
    /// 處理順序：先起點後終點
    pub const ALL: [Role; 2] = [Role::Start, Role::End];

    pub fn station_prefix(self) -> &'static str {
        match self {
            Role::Start => "start_station_",
            Role::End => "end_station_",
        }
    }

    pub fn id_column(self) -> &'static str {
        match self {
            Role::Start => "start_station_id",
            Role::End => "end_station_id",
        }
    }

    pub fn lat_column(self) -> &'static str {
        match self {
            Role::Start => "start_lat",
            Role::End => "end_lat",
        }
    }

    pub fn lng_column(self) -> &'static str {
        match self {
            Role::Start => "start_lng",
            Role::End => "end_lng",
        }
    }
}

/// Column positions for one role, resolved once from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleColumns {
    pub id: Option<usize>,
    /// Role-prefixed attribute columns in header order.
    pub attributes: Vec<(usize, StationAttribute)>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
}

impl RoleColumns {
    fn resolve(role: Role, headers: &StringRecord) -> Self {
        let mut columns = RoleColumns {
            id: column_index(headers, role.id_column()),
            latitude: column_index(headers, role.lat_column()),
            longitude: column_index(headers, role.lng_column()),
            ..RoleColumns::default()
        };

        for (idx, header) in headers.iter().enumerate() {
            let Some(key) = header.strip_prefix(role.station_prefix()) else {
                continue;
            };
            // 只有前綴的欄位沒有屬性名稱，不輸出
            if key.is_empty() || key == "id" {
                continue;
            }

            let attribute = if key == STATION_ID_COLUMN {
                // 保留 station_id 給輸出的識別欄
                StationAttribute::Other(format!("station_{}", key))
            } else {
                StationAttribute::from_key(key)
            };
            // 重複欄位名稱以最後一欄為準
            match columns.attributes.iter_mut().find(|(_, a)| *a == attribute) {
                Some(existing) => existing.0 = idx,
                None => columns.attributes.push((idx, attribute)),
            }
        }

        columns
    }

    /// Non-empty station id of this role, if the row has one.
    pub fn station_id<'r>(&self, row: &'r StringRecord) -> Option<&'r str> {
        Some(field(row, self.id)).filter(|id| !id.is_empty())
    }
}

/// Typed view of a trip header: which columns describe the start and end
/// stations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripSchema {
    pub start: RoleColumns,
    pub end: RoleColumns,
}

impl TripSchema {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let schema = TripSchema {
            start: RoleColumns::resolve(Role::Start, headers),
            end: RoleColumns::resolve(Role::End, headers),
        };
        tracing::debug!(
            "Resolved trip schema: {} start attributes, {} end attributes",
            schema.start.attributes.len(),
            schema.end.attributes.len()
        );
        schema
    }

    pub fn role(&self, role: Role) -> &RoleColumns {
        match role {
            Role::Start => &self.start,
            Role::End => &self.end,
        }
    }
}

/// Position of the last column with this name.
pub fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name)
        .map(|(idx, _)| idx)
        .last()
}

/// 取欄位值，欄位不存在時為空字串
pub fn field(row: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_resolve_role_columns() {
        let h = headers(&[
            "ride_id",
            "start_station_name",
            "start_station_id",
            "end_station_name",
            "end_station_id",
            "start_lat",
            "start_lng",
            "end_lat",
            "end_lng",
        ]);
        let schema = TripSchema::from_headers(&h);

        assert_eq!(schema.start.id, Some(2));
        assert_eq!(schema.start.attributes, vec![(1, StationAttribute::Name)]);
        assert_eq!(schema.start.latitude, Some(5));
        assert_eq!(schema.start.longitude, Some(6));
        assert_eq!(schema.end.id, Some(4));
        assert_eq!(schema.end.attributes, vec![(3, StationAttribute::Name)]);
        assert_eq!(schema.role(Role::End).latitude, Some(7));
    }

    #[test]
    fn test_missing_columns() {
        let schema = TripSchema::from_headers(&headers(&["ride_id", "end_station_id"]));
        assert_eq!(schema.start, RoleColumns::default());
        assert_eq!(schema.end.id, Some(1));
        assert!(schema.end.attributes.is_empty());
    }

    #[test]
    fn test_extra_attributes_and_duplicates() {
        let h = headers(&[
            "start_station_capacity",
            "start_station_name",
            "start_station_capacity",
            "start_station_",
        ]);
        let schema = TripSchema::from_headers(&h);
        assert_eq!(
            schema.start.attributes,
            vec![
                (2, StationAttribute::Other("capacity".to_string())),
                (1, StationAttribute::Name),
            ]
        );
    }

    #[test]
    fn test_station_id_attribute_does_not_shadow_identifier() {
        let h = headers(&[
            "start_station_id",
            "start_station_station_id",
            "end_station_id",
            "end_station_station_id",
        ]);
        let schema = TripSchema::from_headers(&h);
        let renamed = StationAttribute::Other("station_station_id".to_string());

        assert_eq!(schema.start.id, Some(0));
        assert_eq!(schema.start.attributes, vec![(1, renamed.clone())]);
        assert_eq!(schema.end.attributes, vec![(3, renamed)]);
    }

    #[test]
    fn test_station_id_requires_value() {
        let schema =
            TripSchema::from_headers(&headers(&["start_station_id", "end_station_id"]));
        let row = StringRecord::from(vec!["", "B1"]);
        assert_eq!(schema.start.station_id(&row), None);
        assert_eq!(schema.end.station_id(&row), Some("B1"));
    }
}
