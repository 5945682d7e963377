use chrono::NaiveDateTime;
use std::io::Cursor;

/// EXIFの撮影日時から `YYYY-MM-DD` を取り出す
pub fn extract_date(bytes: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
    let mut cursor = Cursor::new(bytes);
    let exif_reader = exif::Reader::new();
    let exif = exif_reader.read_from_container(&mut cursor)?;

    // DateTimeOriginal を優先し、なければ DateTime
    let field = exif
        .get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))
        .ok_or("No date found in EXIF")?;

    let raw = field.display_value().to_string();
    normalize_date(&raw).ok_or_else(|| "Unrecognized EXIF date".into())
}

/// `2024:05:01 10:20:30` / `2024-05-01 10:20:30` → `2024-05-01`
fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y:%m:%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date().format("%Y-%m-%d").to_string())
}
