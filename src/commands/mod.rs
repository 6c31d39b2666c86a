//! Command handlers dispatched from `main`.

pub mod build;
pub mod clean;
pub mod doctor;

pub use build::{handle_build, BuildParams};
pub use clean::{handle_clean, CleanParams};
pub use doctor::{handle_doctor, DoctorParams};
