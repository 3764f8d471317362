pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, DuplicatePolicy, GeoPoint};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_coordinates, validate_path, validate_positive_distance, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTANCE_KM: f64 = 100.0;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "customer-invites")]
#[command(about = "Generate a list of customers within a given distance of the office")]
pub struct CliConfig {
    #[arg(long, default_value_t = DEFAULT_DISTANCE_KM, help = "Distance from the office in km")]
    pub distance: f64,

    #[arg(long, help = "Enable debug logs")]
    pub debug: bool,

    #[arg(long, default_value = "customers.txt", help = "Newline-delimited JSON customer file")]
    pub input: String,

    #[arg(long, default_value = "output.txt", help = "Where the invite list is written")]
    pub output: String,

    #[arg(long, default_value_t = GeoPoint::DEFAULT_OFFICE.latitude, allow_negative_numbers = true)]
    pub office_latitude: f64,

    #[arg(long, default_value_t = GeoPoint::DEFAULT_OFFICE.longitude, allow_negative_numbers = true)]
    pub office_longitude: f64,

    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Reject)]
    pub on_duplicate_id: DuplicatePolicy,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn office(&self) -> GeoPoint {
        GeoPoint::new(self.office_latitude, self.office_longitude)
    }

    fn distance_km(&self) -> f64 {
        self.distance
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.on_duplicate_id
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_positive_distance("distance", self.distance)?;
        validate_coordinates("office", &self.office())
    }
}
