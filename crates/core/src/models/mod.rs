pub mod analytics;
pub mod investment;
pub mod portfolio;
pub mod report;
