//! Enumeration of locally persisted Telegram session files.

use std::path::Path;

/// Default directory holding persisted session files.
pub const SESSIONS_DIR: &str = "sessions";

/// File extension of persisted session files.
const SESSION_EXTENSION: &str = "session";

/// Lists the names of persisted sessions in `dir`.
///
/// A session name is the filename stem of a `*.session` file. Order follows
/// filesystem enumeration and is not guaranteed. An absent or empty
/// directory yields an empty list; file contents are not inspected.
#[must_use]
pub fn session_names(dir: impl AsRef<Path>) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == SESSION_EXTENSION) {
                path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs::File;

    use super::*;

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(session_names(dir.path()).is_empty());
    }

    #[test]
    fn test_absent_directory() {
        assert!(session_names("definitely/does/not/exist").is_empty());
    }

    #[test]
    fn test_lists_session_stems() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.session")).unwrap();
        File::create(dir.path().join("b.session")).unwrap();

        let names: HashSet<String> = session_names(dir.path()).into_iter().collect();
        assert_eq!(names, HashSet::from(["a".to_owned(), "b".to_owned()]));
    }

    #[test]
    fn test_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("account.session")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("session")).unwrap();

        assert_eq!(session_names(dir.path()), vec!["account".to_owned()]);
    }
}
