//! Class name validation
//!
//! A class name may only contain ASCII letters, digits and spaces, and must
//! start with a letter. A name containing a space is still rejected by the
//! final acceptance check, so in practice valid names are single words.

/// Returns true if `name` is acceptable as a class name
///
/// # Example
/// ```rust
/// use umlmodel::is_valid_name;
///
/// assert!(is_valid_name("Car"));
/// assert!(is_valid_name("Car1"));
/// assert!(!is_valid_name("1Car"));
/// assert!(!is_valid_name("My Car"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };

    let has_special = name
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == ' '));
    if has_special {
        return false;
    }

    first.is_alphabetic() && !name.contains(' ')
}
