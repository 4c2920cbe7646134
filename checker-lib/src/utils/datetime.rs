use chrono::NaiveDateTime;

pub fn get_utc_iso_datetime() -> String {
    let timestamp = chrono::Utc::now().to_rfc3339();
    return timestamp;
}

/// Render a spreadsheet date cell the way a person would type it: a bare date when
/// there is no time component, otherwise `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn format_cell_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == chrono::NaiveTime::MIN {
        dt.date().format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
