pub mod notebook;
pub mod note;
pub mod tag;

pub use notebook::Notebook;
pub use note::{Note, NoteWithTags, SearchHit};
pub use tag::Tag;

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 UTC string.
///
/// Fixed microsecond precision keeps string order equal to time order, which
/// the `ORDER BY updated_at` queries rely on.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_fixed_width() {
        let ts = timestamp();
        assert_eq!(ts.len(), "2024-01-01T00:00:00.000000Z".len());
        assert!(ts.ends_with('Z'));
    }
}
