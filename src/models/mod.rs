pub mod entry;
pub mod scan_result;
