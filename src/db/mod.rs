pub mod postgres;
pub mod saved_media;

pub use postgres::create_pool;
