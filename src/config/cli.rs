use crate::app::pipelines::AggregateMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_exactly_one, Validate};
use clap::{ArgGroup, Parser};

/// Data comes only from stdin, so the plain tools take no options.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "extract-stations", version)]
#[command(about = "Extract unique stations with names and coordinates from BlueBikes trip data")]
pub struct ExtractStationsArgs {}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "filter-newton", version)]
#[command(about = "Keep only BlueBikes trips that start or end at a Newton station")]
pub struct FilterNewtonArgs {}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "clean-trips", version)]
#[command(about = "Normalize timestamps and coordinates and add trip durations")]
pub struct CleanTripsArgs {}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "aggregate-trips", version)]
#[command(about = "Aggregate BlueBikes data by stations or station pairs")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["stations", "station_pairs"])
))]
pub struct AggregateArgs {
    /// Analyze data by individual station
    #[arg(long)]
    pub stations: bool,

    /// Analyze data by station pairs
    #[arg(long)]
    pub station_pairs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl AggregateArgs {
    pub fn mode(&self) -> Result<AggregateMode> {
        let flag = validate_exactly_one(
            "mode",
            &[
                ("--stations", self.stations),
                ("--station-pairs", self.station_pairs),
            ],
        )?;
        Ok(match flag {
            "--stations" => AggregateMode::Stations,
            _ => AggregateMode::StationPairs,
        })
    }
}

impl Validate for AggregateArgs {
    fn validate(&self) -> Result<()> {
        self.mode().map(|_| ())
    }
}
