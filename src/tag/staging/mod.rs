mod controller;
mod profile;

pub use controller::StagingController;
pub use profile::{FilamentProfile, DEFAULT_MANUFACTURER};
