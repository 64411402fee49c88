//! Route path assembly.
//!
//! Every path handed to the transport is absolute, has no empty segments and
//! no trailing slash (except the root itself). Paths are fixed segments only:
//! anything the transport would read as a parameter or wildcard is rejected.

/// Join path pieces, trimming slashes from each and dropping empty ones.
///
/// ```
/// use autoroute::routing::path::join;
/// assert_eq!(join(&["/", "example/", "/hello-world"]), "/example/hello-world");
/// assert_eq!(join(&["", "/"]), "/");
/// ```
pub fn join(pieces: &[&str]) -> String {
    let mut out = String::new();
    for piece in pieces {
        for segment in piece.split('/').filter(|s| !s.is_empty()) {
            out.push('/');
            out.push_str(segment);
        }
    }

    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Normalize a single path: leading slash, duplicate slashes collapsed.
pub fn normalize(path: &str) -> String {
    join(&[path])
}

/// Returns the first segment the transport would not treat literally.
pub fn find_dynamic_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| {
        segment.starts_with(':')
            || segment.starts_with('*')
            || segment.contains('{')
            || segment.contains('}')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_trims_and_collapses() {
        assert_eq!(join(&["/", "example", "hello-world"]), "/example/hello-world");
        assert_eq!(join(&["/v1/", "//home/", "index"]), "/v1/home/index");
        assert_eq!(join(&["/api", "/"]), "/api");
        assert_eq!(join(&[]), "/");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a//b/"), "/a/b");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_dynamic_segments() {
        assert_eq!(find_dynamic_segment("/users/{id}"), Some("{id}"));
        assert_eq!(find_dynamic_segment("/files/*rest"), Some("*rest"));
        assert_eq!(find_dynamic_segment("/users/:id"), Some(":id"));
        assert_eq!(find_dynamic_segment("/users/list"), None);
    }
}
