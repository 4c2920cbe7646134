mod datetime;
mod filesystem;
mod string;

pub use datetime::get_utc_iso_datetime;
pub(crate) use datetime::format_cell_datetime;
pub use filesystem::write_error_to_log;
pub use string::{fold_key, normalize_string, strip_duplicate_suffix};
