// Business domains
pub mod absences;
pub mod auth;
