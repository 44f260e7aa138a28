pub mod discovery;
pub mod saved;
