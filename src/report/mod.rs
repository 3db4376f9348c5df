mod rows;
#[cfg(test)]
mod tests;
mod writer;

pub use writer::{write_report, LOT_HEADERS, OPEN_POSITION_HEADERS, SECURITY_HEADERS, SUMMARY_HEADERS};
