//! Slash-separated object paths
//!
//! Paths are relative to a hierarchy root and never include the root's own
//! name: `Arm/Hand` names the `Hand` child of the root's `Arm` child.

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// Attribute name recorded for curves that carry no attribute field
pub const DEFAULT_ATTRIBUTE: &str = "Position";

/// The leaf object name of a path: its last segment, or `""` for the empty path.
pub fn object_name(path: &str) -> &str {
    if path.is_empty() {
        return "";
    }
    path.rsplit(PATH_SEPARATOR).next().unwrap_or("")
}

/// Split a path into the child names walked from the root.
///
/// The empty path yields no segments and addresses the root itself.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    let skip_all = path.is_empty();
    path.split(PATH_SEPARATOR).filter(move |_| !skip_all)
}

/// Join names (ordered from the root downward) into a path.
pub fn join<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 {
            out.push(PATH_SEPARATOR);
        }
        out.push_str(name.as_ref());
    }
    out
}
