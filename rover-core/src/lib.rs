pub mod entity_location;
pub mod tuning;
pub mod vehicle_inputs;
mod settings;

pub use settings::{CameraSettings, Settings};

pub type VehicleID = usize;
