pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};
pub use config::PortfolioConfig;

pub use adapters::HttpClient;
pub use core::{SonarqubeInstance, SonarqubeProject};
pub use domain::model::{
    MeasureEntry, MeasureValue, PortfolioSummary, Project, ProjectMeasureSet, WorstRating,
};
pub use utils::error::{ClientError, Result};
