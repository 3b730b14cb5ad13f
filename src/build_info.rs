//! Version details baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `snake_duel 0.1.0 (2026-10-16, abc1234)`
pub fn version_line() -> String {
    format!(
        "snake_duel {} ({}, {})",
        PKG_VERSION, BUILD_DATE, BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_everything() {
        let line = version_line();
        assert!(line.starts_with("snake_duel "));
        assert!(line.contains(PKG_VERSION));
        assert!(line.contains(BUILD_DATE));
        assert!(line.contains(BUILD_COMMIT));
    }
}
