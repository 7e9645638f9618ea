#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod certificate;
pub mod debounce;
pub mod error;
pub mod progress_store;
pub mod section_tracker;

pub use vanguard_core::Clock;

pub use app_services::AppServices;
pub use certificate::{CelebrationGate, Certificate};
pub use debounce::{Debouncer, SLIDER_SETTLE};
pub use error::{AiError, AppServicesError, ProgressError};
pub use progress_store::{ProgressEvent, ProgressStore};
pub use section_tracker::SectionTracker;
