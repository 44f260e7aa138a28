pub mod certification;
pub mod enrichment;
pub mod provider;
pub mod tmdb;
