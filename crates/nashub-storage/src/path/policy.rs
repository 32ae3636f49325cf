//! Lexical path policy.
//!
//! Client paths are rooted, slash-separated store paths such as
//! `/photos/2024`. [`sanitize`] turns any accepted input into that form and
//! rejects anything that tries to climb upward. Backslashes count as
//! separators so Windows-style traversal is caught as well.

use nashub_core::error::AppError;

/// Canonicalises a client path.
///
/// Empty and `.` segments and repeated separators are dropped. Any `..`
/// segment or NUL byte is rejected outright rather than resolved, so
/// `/a/b/../../etc` fails even though it would stay inside the root.
///
/// ```
/// use nashub_storage::sanitize;
///
/// assert_eq!(sanitize("/a/b/c").unwrap(), "/a/b/c");
/// assert_eq!(sanitize("a//./b/").unwrap(), "/a/b");
/// assert!(sanitize("/a/b/../../etc").is_err());
/// ```
pub fn sanitize(raw: &str) -> Result<String, AppError> {
    if raw.contains('\0') {
        return Err(invalid_path());
    }

    let mut segments = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid_path()),
            s => segments.push(s),
        }
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Validates a single path component supplied separately from a path, such
/// as an uploaded file name or a new folder name.
pub fn sanitize_name(name: &str) -> Result<&str, AppError> {
    if name.is_empty() || name == "." {
        return Err(AppError::validation("Name must not be empty"));
    }
    if name.contains("..") || name.contains(['/', '\\', '\0']) {
        return Err(AppError::validation(format!("Invalid name: '{name}'")));
    }
    Ok(name)
}

/// Validates a share name: a single path component without whitespace.
pub fn validate_share_name(name: &str) -> Result<&str, AppError> {
    sanitize_name(name)?;
    if name.chars().any(char::is_whitespace) {
        return Err(AppError::validation(
            "Share name must not contain whitespace",
        ));
    }
    Ok(name)
}

/// Appends an already validated component to a sanitised path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}

fn invalid_path() -> AppError {
    AppError::validation("Invalid path")
}
