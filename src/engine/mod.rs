mod errors;
mod gains_engine;
mod reader;

pub use errors::LoadError;
pub use gains_engine::{GainsEngine, GainsReport};
pub use reader::TransactionReader;
