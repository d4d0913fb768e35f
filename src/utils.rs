use chrono::{DateTime, Utc};

/// Derives the per-plugin storage filename stem from its display name.
///
/// Lower-cases, drops non-ASCII characters (not replaced), removes
/// apostrophes, joins `" & "` pairs with a single underscore, and maps
/// the remaining spaces and slashes to underscores. Idempotent.
pub fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(" & ", "_")
        .replace('\'', "")
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

/// Formats the run's capture time. The result is both the snapshot
/// document key and the `captured_at` field of every record in the run;
/// it is computed once in `main` and threaded through as a parameter.
pub fn capture_time(now: DateTime<Utc>) -> String {
    now.format("%d-%m-%Y %H:%M").to_string()
}

/// Capture timestamp to snapshot backup filename stem. Spaces and
/// colons are not filename-safe everywhere.
pub fn timestamp_file_stem(captured_at: &str) -> String {
    captured_at.replace(' ', "_").replace(':', "-")
}
