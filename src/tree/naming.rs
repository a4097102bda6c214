//! Name validation and collision-free naming for copies.

use crate::error::OpError;

/// Reject names that cannot live in a directory: blank names, names with a
/// path separator or a control character, and the navigation names `.` and `..`.
pub fn validate_name(name: &str) -> Result<(), OpError> {
    if name.trim().is_empty()
        || name.contains('/')
        || name.chars().any(char::is_control)
        || name == "."
        || name == ".."
    {
        return Err(OpError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Split `name` at its last `.` into stem and extension (dot included).
///
/// A name without a dot, or whose only dot is the leading one (`.bashrc`),
/// is all stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}

/// First name not rejected by `taken`: `name` itself, then `stem1ext`,
/// `stem2ext`, and so on.
pub fn next_free_name<F>(name: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(name) {
        return name.to_string();
    }
    let (stem, ext) = split_extension(name);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}{}{}", stem, counter, ext);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
