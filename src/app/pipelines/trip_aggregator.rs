use crate::core::etl::read_headers;
use crate::core::{Pipeline, Result, RunSummary};
use crate::domain::model::TripLeg;
use crate::domain::municipality::{display_name, is_newton_station, municipality_name};
use crate::domain::stats::{BikeType, DirectionalStats, METRIC_COLUMNS};
use std::collections::{BTreeMap, HashMap};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// 每個站點一列 (出發 / 抵達)
    Stations,
    /// 每個有序站點配對一列 (A→B / B→A)
    StationPairs,
}

pub const STATION_INFO_COLUMNS: [&str; 5] = [
    "station_id",
    "station_name",
    "municipality",
    "latitude",
    "longitude",
];

pub const PAIR_INFO_COLUMNS: [&str; 10] = [
    "start_station",
    "start_station_name",
    "start_lat",
    "start_lng",
    "end_station",
    "end_station_name",
    "end_lat",
    "end_lng",
    "start_municipality",
    "end_municipality",
];

/// Average station position, already rendered with five decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Copy, Default)]
struct CoordinateSum {
    latitude: f64,
    longitude: f64,
    count: u64,
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// First pass: average every parsable coordinate reported for a station, from
/// either end of a trip.
pub fn average_coordinates(legs: &[TripLeg]) -> HashMap<String, Coordinates> {
    let mut sums: HashMap<&str, CoordinateSum> = HashMap::new();

    for leg in legs {
        let ends = [
            (&leg.start_station_id, &leg.start_lat, &leg.start_lng),
            (&leg.end_station_id, &leg.end_lat, &leg.end_lng),
        ];
        for (station_id, lat, lng) in ends {
            if station_id.is_empty() {
                continue;
            }
            let (Some(lat), Some(lng)) = (parse_coordinate(lat), parse_coordinate(lng)) else {
                continue;
            };
            let sum = sums.entry(station_id.as_str()).or_default();
            sum.latitude += lat;
            sum.longitude += lng;
            sum.count += 1;
        }
    }

    sums.into_iter()
        .map(|(station_id, sum)| {
            let count = sum.count as f64;
            (
                station_id.to_string(),
                Coordinates {
                    latitude: format!("{:.5}", sum.latitude / count),
                    longitude: format!("{:.5}", sum.longitude / count),
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationUsage {
    pub station_name: String,
    pub coordinates: Coordinates,
    pub stats: DirectionalStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairUsage {
    pub start_station_name: String,
    pub end_station_name: String,
    pub start: Coordinates,
    pub end: Coordinates,
    pub stats: DirectionalStats,
}

impl PairUsage {
    fn new(start: &Coordinates, end: &Coordinates) -> Self {
        Self {
            start_station_name: String::new(),
            end_station_name: String::new(),
            start: start.clone(),
            end: end.clone(),
            stats: DirectionalStats::default(),
        }
    }

    /// 起點名稱仍為空時才更新兩端名稱
    fn name_once(&mut self, start_id: &str, start_name: &str, end_id: &str, end_name: &str) {
        if self.start_station_name.is_empty() {
            self.start_station_name = display_name(start_id, start_name);
            self.end_station_name = display_name(end_id, end_name);
        }
    }
}

/// A trip that counts toward the statistics, with its parsed duration.
struct CountedTrip<'a> {
    leg: &'a TripLeg,
    start: &'a Coordinates,
    end: &'a Coordinates,
    duration: f64,
    bike: BikeType,
}

/// Skips round trips, trips with a missing endpoint, endpoints without an
/// average position and unparsable durations.
fn counted_trips<'a>(
    legs: &'a [TripLeg],
    coordinates: &'a HashMap<String, Coordinates>,
) -> impl Iterator<Item = CountedTrip<'a>> + 'a {
    legs.iter().filter_map(move |leg| {
        let (start_id, end_id) = (&leg.start_station_id, &leg.end_station_id);
        if start_id.is_empty() || end_id.is_empty() || start_id == end_id {
            return None;
        }
        let start = coordinates.get(start_id)?;
        let end = coordinates.get(end_id)?;
        let duration = leg.duration()?;
        Some(CountedTrip {
            leg,
            start,
            end,
            duration,
            bike: BikeType::from_rideable_type(&leg.rideable_type),
        })
    })
}

fn pair_sort_key(pair: &(String, String)) -> ((bool, &str), (bool, &str)) {
    (
        (!is_newton_station(&pair.0), pair.0.as_str()),
        (!is_newton_station(&pair.1), pair.1.as_str()),
    )
}

/// Usage statistics per station or per station pair.
#[derive(Debug, Clone, Copy)]
pub struct TripAggregator {
    mode: AggregateMode,
}

impl TripAggregator {
    pub fn new(mode: AggregateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AggregateMode {
        self.mode
    }

    /// 讀入所有行程，第二階段需要完整資料
    pub fn read_legs<R: io::Read>(&self, reader: &mut csv::Reader<R>) -> Result<Vec<TripLeg>> {
        read_headers(reader)?;
        let legs = reader.deserialize().collect::<std::result::Result<Vec<TripLeg>, _>>()?;
        tracing::debug!("Buffered {} trip rows", legs.len());
        Ok(legs)
    }

    pub fn station_usage(
        &self,
        legs: &[TripLeg],
        coordinates: &HashMap<String, Coordinates>,
    ) -> BTreeMap<String, StationUsage> {
        let mut stations: BTreeMap<String, StationUsage> = BTreeMap::new();

        for trip in counted_trips(legs, coordinates) {
            let leg = trip.leg;
            let ends = [
                (&leg.start_station_id, &leg.start_station_name, trip.start, true),
                (&leg.end_station_id, &leg.end_station_name, trip.end, false),
            ];
            for (station_id, station_name, position, departing) in ends {
                let usage = stations
                    .entry(station_id.clone())
                    .or_insert_with(|| StationUsage {
                        station_name: String::new(),
                        coordinates: position.clone(),
                        stats: DirectionalStats::default(),
                    });
                if usage.station_name.is_empty() {
                    usage.station_name = display_name(station_id, station_name);
                }
                let tally = if departing {
                    &mut usage.stats.forward
                } else {
                    &mut usage.stats.reverse
                };
                tally.add(trip.duration, trip.bike);
            }
        }

        stations
    }

    /// Pairs ordered with Newton stations first, then by id.
    pub fn pair_usage(
        &self,
        legs: &[TripLeg],
        coordinates: &HashMap<String, Coordinates>,
    ) -> Vec<((String, String), PairUsage)> {
        let mut pairs: HashMap<(String, String), PairUsage> = HashMap::new();

        for trip in counted_trips(legs, coordinates) {
            let leg = trip.leg;
            let (start_id, end_id) = (&leg.start_station_id, &leg.end_station_id);
            let (start_name, end_name) = (&leg.start_station_name, &leg.end_station_name);

            let forward = pairs
                .entry((start_id.clone(), end_id.clone()))
                .or_insert_with(|| PairUsage::new(trip.start, trip.end));
            forward.name_once(start_id, start_name, end_id, end_name);
            forward.stats.forward.add(trip.duration, trip.bike);

            let reverse = pairs
                .entry((end_id.clone(), start_id.clone()))
                .or_insert_with(|| PairUsage::new(trip.end, trip.start));
            reverse.stats.reverse.add(trip.duration, trip.bike);
            reverse.name_once(end_id, end_name, start_id, start_name);
        }

        let mut sorted: Vec<_> = pairs.into_iter().collect();
        sorted.sort_by(|a, b| pair_sort_key(&a.0).cmp(&pair_sort_key(&b.0)));
        sorted
    }

    fn write_stations<W: io::Write>(
        &self,
        stations: &BTreeMap<String, StationUsage>,
        writer: &mut csv::Writer<W>,
    ) -> Result<usize> {
        writer.write_record(STATION_INFO_COLUMNS.iter().chain(METRIC_COLUMNS.iter()))?;

        let mut written = 0;
        for (station_id, usage) in stations {
            if usage.stats.total_trips() == 0 {
                continue;
            }
            let info = [
                station_id.as_str(),
                usage.station_name.as_str(),
                municipality_name(station_id),
                usage.coordinates.latitude.as_str(),
                usage.coordinates.longitude.as_str(),
            ];
            let metrics = usage.stats.metric_fields();
            writer.write_record(info.iter().copied().chain(metrics.iter().map(String::as_str)))?;
            written += 1;
        }
        Ok(written)
    }

    fn write_pairs<W: io::Write>(
        &self,
        pairs: &[((String, String), PairUsage)],
        writer: &mut csv::Writer<W>,
    ) -> Result<usize> {
        writer.write_record(PAIR_INFO_COLUMNS.iter().chain(METRIC_COLUMNS.iter()))?;

        let mut written = 0;
        for ((start_id, end_id), usage) in pairs {
            if usage.stats.total_trips() == 0 {
                continue;
            }
            let info = [
                start_id.as_str(),
                usage.start_station_name.as_str(),
                usage.start.latitude.as_str(),
                usage.start.longitude.as_str(),
                end_id.as_str(),
                usage.end_station_name.as_str(),
                usage.end.latitude.as_str(),
                usage.end.longitude.as_str(),
                municipality_name(start_id),
                municipality_name(end_id),
            ];
            let metrics = usage.stats.metric_fields();
            writer.write_record(info.iter().copied().chain(metrics.iter().map(String::as_str)))?;
            written += 1;
        }
        Ok(written)
    }
}

impl Pipeline for TripAggregator {
    fn name(&self) -> &str {
        match self.mode {
            AggregateMode::Stations => "aggregate-stations",
            AggregateMode::StationPairs => "aggregate-station-pairs",
        }
    }

    fn run<R: io::Read, W: io::Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary> {
        let legs = self.read_legs(reader)?;
        let coordinates = average_coordinates(&legs);
        tracing::debug!("Averaged coordinates for {} stations", coordinates.len());

        let rows_written = match self.mode {
            AggregateMode::Stations => {
                let stations = self.station_usage(&legs, &coordinates);
                self.write_stations(&stations, writer)?
            }
            AggregateMode::StationPairs => {
                let pairs = self.pair_usage(&legs, &coordinates);
                self.write_pairs(&pairs, writer)?
            }
        };

        Ok(RunSummary {
            rows_read: legs.len(),
            rows_written,
        })
    }
}
