pub mod bounding_box;
pub mod math;
pub mod ramp;
pub mod raycast;
pub mod rigid_body;
pub mod terrain;
