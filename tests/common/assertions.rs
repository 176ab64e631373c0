//! Domain-specific assertion macros for sevlog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* storage invariant was violated.

// ---------------------------------------------------------------------------
// File streams
// ---------------------------------------------------------------------------

/// Assert that stream `name` in `dir` has exactly the backlog files
/// `1..=len`, with no gaps and nothing beyond.
///
/// ```rust
/// assert_backlog!(dir.path(), "log", 3);
/// ```
#[macro_export]
macro_rules! assert_backlog {
    ($dir:expr, $name:expr, $len:expr) => {{
        let dir: std::path::PathBuf = $dir.into();
        let name: &str = $name;
        let len: usize = $len;
        let found = $crate::common::backlog_indices(&dir, name, "txt");
        let expected: Vec<usize> = (1..=len).collect();
        if found != expected {
            panic!(
                "assert_backlog! failed for stream {:?} in {}:\n  expected indices: {:?}\n  found:            {:?}",
                name,
                dir.display(),
                expected,
                found
            );
        }
    }};
}

/// Assert the messages stored in one file, in order.
///
/// ```rust
/// assert_messages!(dir.path().join("log1.txt"), ["event 0003"]);
/// ```
#[macro_export]
macro_rules! assert_messages {
    ($path:expr, [$($message:expr),* $(,)?]) => {{
        let path: std::path::PathBuf = $path.into();
        let expected: Vec<String> = vec![$($message.to_string()),*];
        let actual = $crate::common::messages_in(&path);
        pretty_assertions::assert_eq!(actual, expected, "messages in {}", path.display());
    }};
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Assert the messages held by a collection of a [`MemoryDatabase`], in
/// insertion order.
#[macro_export]
macro_rules! assert_collection {
    ($db:expr, $collection:expr, $expected:expr) => {{
        let db: &sevlog::MemoryDatabase = &$db;
        let collection: &str = $collection;
        let actual: Vec<String> = db
            .documents(collection)
            .into_iter()
            .map(|d| d.message)
            .collect();
        let expected: Vec<String> = $expected.into_iter().map(|m| m.to_string()).collect();
        pretty_assertions::assert_eq!(actual, expected, "documents in collection {:?}", collection);
    }};
}

/// Assert the kind of an error result.
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {{
        match $result {
            Ok(value) => panic!(
                "assert_error_kind! failed: expected {:?}, got Ok({:?})",
                $kind, value
            ),
            Err(err) => {
                let err: sevlog::LogError = err;
                if err.kind() != $kind {
                    panic!(
                        "assert_error_kind! failed:\n  expected: {:?}\n  actual:   {:?} ({})",
                        $kind,
                        err.kind(),
                        err
                    );
                }
                err
            }
        }
    }};
}
