//! Arcade vehicle locomotion: a ground-sensing controller that drives a rigid
//! body, plus the small world it is exercised in (terrain, integrator, chase
//! camera, garage and a fixed-step host loop).

pub mod camera;
pub mod game;
pub mod garage;
pub mod input;
pub mod physics;
pub mod vehicle;
pub mod vehicles;
