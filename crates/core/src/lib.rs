#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod palette;
pub mod time;
pub mod visibility;

pub use catalog::vanguard_curriculum;
pub use time::Clock;
