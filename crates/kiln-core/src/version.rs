//! Lenient version parsing
//!
//! Tools report versions as `v20.11.1`, `2.43` or `git version 2.39.3`.
//! These helpers turn the common shapes into `semver::Version`.

use semver::Version;

/// Parse a version string, tolerating a leading `v` and missing components
///
/// `"18"` becomes `18.0.0` and `"2.43"` becomes `2.43.0`.
pub fn parse_lenient(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches('v');
    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }

    let core = trimmed.split(['-', '+']).next().unwrap_or(trimmed);
    let mut parts = core.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    let patch = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    Some(Version::new(major, minor, patch))
}

/// True when `actual` is at least `required`
///
/// Unparseable input on either side counts as satisfied so an odd
/// `--version` banner never produces a false alarm.
pub fn satisfies(actual: &str, required: &str) -> bool {
    match (parse_lenient(actual), parse_lenient(required)) {
        (Some(actual), Some(required)) => actual >= required,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_shapes() {
        assert_eq!(parse_lenient("v20.11.1"), Some(Version::new(20, 11, 1)));
        assert_eq!(parse_lenient("2.43"), Some(Version::new(2, 43, 0)));
        assert_eq!(parse_lenient("18"), Some(Version::new(18, 0, 0)));
        assert_eq!(parse_lenient("1.2.3-beta.1").map(|v| v.major), Some(1));
        assert_eq!(parse_lenient("not a version"), None);
        assert_eq!(parse_lenient("1.2.3.4"), None);
    }

    #[test]
    fn test_satisfies() {
        assert!(satisfies("20.1.0", "18.0.0"));
        assert!(satisfies("18.0.0", "18.0.0"));
        assert!(!satisfies("16.20.2", "18.0.0"));
        assert!(satisfies("garbage", "18.0.0"));
    }
}
