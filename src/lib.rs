pub mod aggregate;
pub mod artifact;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod html;
pub mod kpi;
pub mod loader;
pub mod models;
pub mod pages;
pub mod server;
pub mod table;
pub mod view;

pub use error::LoadError;
pub use loader::{Dataset, DatasetCache};
