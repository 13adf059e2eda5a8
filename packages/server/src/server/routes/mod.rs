pub mod absences;
pub mod health;

pub use absences::*;
pub use health::*;
