//! Domain models

pub mod accounting;
pub mod asset;
pub mod audit;
pub mod company;
pub mod department;
pub mod employee;
pub mod import_report;
pub mod maintenance;
pub mod request;
pub mod settings;
pub mod user;
