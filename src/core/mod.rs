pub mod batcher;
pub mod instance;
pub mod measures;
pub mod paginator;
pub mod portfolio;
pub mod project;

pub use crate::domain::model::{
    MeasureEntry, MeasureValue, Page, Paging, PortfolioSummary, Project, ProjectMeasureSet,
};
pub use crate::domain::ports::MeasureSource;
pub use crate::utils::error::Result;
pub use instance::SonarqubeInstance;
pub use project::SonarqubeProject;
