pub mod csv_export;
pub mod file;

pub use csv_export::export_schedule;
pub use file::{load_plan, save_plan};
