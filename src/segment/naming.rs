use std::path::{Path, PathBuf};

use regex::Regex;

use crate::timeline::Interval;

/// Build a segment file name: `{prefix}{index:03}_{start:05.1}-{end:05.1}.{ext}`
///
/// The trailing `_<start>-<end>` suffix is the data convention the merger
/// recovers time ranges from, so both formats must stay in lockstep with
/// [`TimeRangeParser`].
pub fn segment_file_name(prefix: &str, index: usize, interval: &Interval, ext: &str) -> String {
    format!(
        "{}{:03}_{:05.1}-{:05.1}.{}",
        prefix, index, interval.start, interval.end, ext
    )
}

/// Build a merged output name: `{prefix}{start of first segment:05.1}.{ext}`
pub fn merged_file_name(prefix: &str, first_start: f64, ext: &str) -> String {
    format!("{}{:05.1}.{}", prefix, first_start, ext)
}

/// Split a caller-supplied prefix into an output directory and a bare name
/// prefix.
///
/// The prefix may encode subdirectories below the output root
/// (`"split/segment_"` puts files named `segment_*` under `<root>/split/`).
/// The directory is not created here.
pub fn resolve_prefix(output_root: &Path, prefix: &str) -> (PathBuf, String) {
    // A trailing separator means "directory only, empty name prefix".
    if prefix.ends_with('/') || prefix.is_empty() {
        return (output_root.join(prefix), String::new());
    }

    let prefix = Path::new(prefix);
    let dir = match prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => output_root.join(parent),
        _ => output_root.to_path_buf(),
    };
    let name = prefix
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    (dir, name)
}

/// Recovers `(start, end)` from the trailing `_<start>-<end>` suffix of a
/// segment file name.
pub struct TimeRangeParser {
    pattern: Regex,
}

impl TimeRangeParser {
    pub fn new() -> Self {
        let pattern = Regex::new(r"_(\d+\.\d+)-(\d+\.\d+)\.[0-9A-Za-z]+$")
            .expect("time range pattern compiles");
        Self { pattern }
    }

    /// Parse the time range out of a file name, if present.
    ///
    /// Returns `None` for names without the suffix and for degenerate ranges
    /// (`end <= start`).
    pub fn parse(&self, path: &Path) -> Option<(f64, f64)> {
        let name = path.file_name()?.to_str()?;
        let captures = self.pattern.captures(name)?;

        let start: f64 = captures[1].parse().ok()?;
        let end: f64 = captures[2].parse().ok()?;

        (end > start).then_some((start, end))
    }
}

impl Default for TimeRangeParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_name_format() {
        let name = segment_file_name("segment_", 0, &Interval::new(0.0, 10.0), "mp4");
        assert_eq!(name, "segment_000_000.0-010.0.mp4");

        let name = segment_file_name("segment_", 2, &Interval::new(16.0, 25.0), "mp4");
        assert_eq!(name, "segment_002_016.0-025.0.mp4");

        // Widths hold for values past the zero-padding
        let name = segment_file_name("s_", 12, &Interval::new(1024.0, 1034.5), "mp4");
        assert_eq!(name, "s_012_1024.0-1034.5.mp4");
    }

    #[test]
    fn test_merged_name_format() {
        assert_eq!(merged_file_name("output_", 8.0, "mp4"), "output_008.0.mp4");
        assert_eq!(merged_file_name("", 124.5, "mkv"), "124.5.mkv");
    }

    #[test]
    fn test_round_trip_through_parser() {
        let parser = TimeRangeParser::new();

        for interval in [
            Interval::new(0.0, 10.0),
            Interval::new(8.0, 18.0),
            Interval::new(16.0, 25.0),
            Interval::new(992.0, 1002.5),
        ] {
            let name = segment_file_name("segment_", 0, &interval, "mp4");
            let (start, end) = parser.parse(Path::new(&name)).unwrap();

            // One-decimal formatting is exact for these values.
            assert_eq!(start, interval.start);
            assert_eq!(end, interval.end);
        }
    }

    #[test]
    fn test_parser_rejects_unrelated_names() {
        let parser = TimeRangeParser::new();

        assert!(parser.parse(Path::new("holiday_clip.mp4")).is_none());
        assert!(parser.parse(Path::new("segment_000.mp4")).is_none());
        assert!(parser.parse(Path::new("segment_000_010.0.mp4")).is_none());
        // integer times don't match the fixed-point pattern
        assert!(parser.parse(Path::new("segment_000_0-10.mp4")).is_none());
    }

    #[test]
    fn test_parser_rejects_degenerate_range() {
        let parser = TimeRangeParser::new();

        assert!(parser.parse(Path::new("x_010.0-010.0.mp4")).is_none());
        assert!(parser.parse(Path::new("x_012.0-010.0.mp4")).is_none());
    }

    #[test]
    fn test_prefix_with_subdirectory() {
        let root = Path::new("/out");

        let (dir, name) = resolve_prefix(root, "split/segment_");
        assert_eq!(dir, Path::new("/out/split"));
        assert_eq!(name, "segment_");

        let (dir, name) = resolve_prefix(root, "a/b/clip_");
        assert_eq!(dir, Path::new("/out/a/b"));
        assert_eq!(name, "clip_");
    }

    #[test]
    fn test_bare_prefix_stays_at_root() {
        let (dir, name) = resolve_prefix(Path::new("/out"), "segment_");
        assert_eq!(dir, Path::new("/out"));
        assert_eq!(name, "segment_");
    }

    #[test]
    fn test_trailing_slash_means_directory_only() {
        let (dir, name) = resolve_prefix(Path::new("/out"), "merged/");
        assert_eq!(dir, Path::new("/out/merged"));
        assert_eq!(name, "");
    }
}
