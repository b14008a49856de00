/// 車種：`docked_bike` 視為傳統車，只有 `electric_bike` 算電動車
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BikeType {
    Classic,
    Electric,
}

impl BikeType {
    pub fn from_rideable_type(rideable_type: &str) -> Self {
        match rideable_type {
            "electric_bike" => BikeType::Electric,
            _ => BikeType::Classic,
        }
    }
}

/// Trip counts and durations for one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripTally {
    pub trips: u64,
    pub electric: u64,
    pub total_duration: f64,
    pub electric_duration: f64,
    pub classic_duration: f64,
}

impl TripTally {
    pub fn add(&mut self, duration: f64, bike: BikeType) {
        self.trips += 1;
        self.total_duration += duration;
        match bike {
            BikeType::Electric => {
                self.electric += 1;
                self.electric_duration += duration;
            }
            BikeType::Classic => self.classic_duration += duration,
        }
    }

    pub fn classic(&self) -> u64 {
        self.trips - self.electric
    }

    fn electric_percent(&self) -> Option<f64> {
        if self.trips == 0 {
            None
        } else {
            Some(self.electric as f64 / self.trips as f64 * 100.0)
        }
    }

    fn merged(&self, other: &TripTally) -> TripTally {
        TripTally {
            trips: self.trips + other.trips,
            electric: self.electric + other.electric,
            total_duration: self.total_duration + other.total_duration,
            electric_duration: self.electric_duration + other.electric_duration,
            classic_duration: self.classic_duration + other.classic_duration,
        }
    }
}

/// Forward and reverse tallies for a station (departures / arrivals) or a
/// station pair (A→B / B→A).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionalStats {
    pub forward: TripTally,
    pub reverse: TripTally,
}

pub const METRIC_COLUMNS: [&str; 20] = [
    "trip_count_fwd",
    "trip_count_rev",
    "trip_count_bidir",
    "trip_count",
    "electric_bike_percent_fwd",
    "electric_bike_percent_rev",
    "electric_bike_percent_bidir",
    "electric_bike_percent",
    "duration_avg_fwd",
    "duration_avg_rev",
    "duration_avg_bidir",
    "duration_avg",
    "electric_bike_duration_avg_fwd",
    "electric_bike_duration_avg_rev",
    "electric_bike_duration_avg_bidir",
    "electric_bike_duration_avg",
    "classic_bike_duration_avg_fwd",
    "classic_bike_duration_avg_rev",
    "classic_bike_duration_avg_bidir",
    "classic_bike_duration_avg",
];

fn average(total: f64, count: u64) -> f64 {
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// 百分比取整數；沒有行程時輸出 `0`，否則輸出帶一位小數的整數值 (例如 `67.0`)
fn rounded_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) => format!("{:.1}", value.round_ties_even()),
        None => "0".to_string(),
    }
}

fn combined(bidir: f64, fwd: f64, rev: f64, suffix: &str, digits: usize) -> String {
    format!(
        "{bidir:.digits$}{suffix} (F: {fwd:.digits$}{suffix} / R: {rev:.digits$}{suffix})"
    )
}

/// Three directional averages plus their combined text column.
fn duration_fields(fwd: f64, rev: f64, bidir: f64) -> [String; 4] {
    [
        format!("{:.1}", fwd),
        format!("{:.1}", rev),
        format!("{:.1}", bidir),
        combined(bidir, fwd, rev, "", 1),
    ]
}

impl DirectionalStats {
    pub fn total_trips(&self) -> u64 {
        self.forward.trips + self.reverse.trips
    }

    /// Values for [`METRIC_COLUMNS`], in the same order.
    pub fn metric_fields(&self) -> Vec<String> {
        let fwd = &self.forward;
        let rev = &self.reverse;
        let bidir = fwd.merged(rev);

        let fwd_pct = fwd.electric_percent();
        let rev_pct = rev.electric_percent();
        let bidir_pct = bidir.electric_percent();

        let mut fields = vec![
            fwd.trips.to_string(),
            rev.trips.to_string(),
            bidir.trips.to_string(),
            format!("{} (F: {} / R: {})", bidir.trips, fwd.trips, rev.trips),
            rounded_percent(fwd_pct),
            rounded_percent(rev_pct),
            rounded_percent(bidir_pct),
            combined(
                bidir_pct.unwrap_or(0.0),
                fwd_pct.unwrap_or(0.0),
                rev_pct.unwrap_or(0.0),
                "%",
                0,
            ),
        ];

        fields.extend(duration_fields(
            average(fwd.total_duration, fwd.trips),
            average(rev.total_duration, rev.trips),
            average(bidir.total_duration, bidir.trips),
        ));
        fields.extend(duration_fields(
            average(fwd.electric_duration, fwd.electric),
            average(rev.electric_duration, rev.electric),
            average(bidir.electric_duration, bidir.electric),
        ));
        fields.extend(duration_fields(
            average(fwd.classic_duration, fwd.classic()),
            average(rev.classic_duration, rev.classic()),
            average(bidir.classic_duration, bidir.classic()),
        ));

        fields
    }
}
