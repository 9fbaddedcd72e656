//! Namespace qualification of attribute names.
//!
//! Attribute names on disk are fully qualified (`user.comment`). Callers may
//! instead pass a bare name plus a namespace; this module merges the two and,
//! for listings, strips the namespace back off while filtering out names from
//! other namespaces.
//!
//! An empty namespace behaves exactly like an absent one.

use std::borrow::Cow;

use crate::error::{Result, XattrError};

/// User-defined attributes.
pub const NS_USER: &[u8] = b"user";
/// System attributes, such as POSIX ACLs.
pub const NS_SYSTEM: &[u8] = b"system";
/// Trusted attributes, readable only with `CAP_SYS_ADMIN`.
pub const NS_TRUSTED: &[u8] = b"trusted";
/// Security labels (SELinux, SMACK, capabilities).
pub const NS_SECURITY: &[u8] = b"security";

const SEPARATOR: u8 = b'.';

fn active(namespace: Option<&[u8]>) -> Option<&[u8]> {
    namespace.filter(|ns| !ns.is_empty())
}

/// Merges an optional namespace with a bare attribute name.
///
/// Returns `name` untouched when no namespace is in effect; otherwise a fresh
/// `namespace.name` buffer.
pub fn qualify<'a>(namespace: Option<&[u8]>, name: &'a [u8]) -> Result<Cow<'a, [u8]>> {
    let Some(ns) = active(namespace) else {
        return Ok(Cow::Borrowed(name));
    };

    let expected = ns.len() + 1 + name.len();
    let mut merged = Vec::new();
    merged
        .try_reserve_exact(expected)
        .map_err(|_| XattrError::OutOfMemory {
            requested: expected,
        })?;
    merged.extend_from_slice(ns);
    merged.push(SEPARATOR);
    merged.extend_from_slice(name);

    if merged.len() != expected {
        return Err(XattrError::Format {
            expected,
            actual: merged.len(),
        });
    }
    Ok(Cow::Owned(merged))
}

/// Matches a listed attribute name against an optional namespace.
///
/// - No namespace in effect: always matches, returns `candidate` unchanged.
/// - Otherwise: returns the part after `namespace.` when `candidate` starts
///   with it and has at least one byte left over; `None` when it doesn't.
#[must_use]
pub fn strip<'a>(namespace: Option<&[u8]>, candidate: &'a [u8]) -> Option<&'a [u8]> {
    let Some(ns) = active(namespace) else {
        return Some(candidate);
    };

    if candidate.len() > ns.len() + 1
        && candidate.starts_with(ns)
        && candidate[ns.len()] == SEPARATOR
    {
        Some(&candidate[ns.len() + 1..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_with_namespace() {
        let name = qualify(Some(NS_USER), b"comment").unwrap();
        assert_eq!(&*name, b"user.comment");
        assert!(matches!(name, Cow::Owned(_)));
    }

    #[test]
    fn test_qualify_without_namespace() {
        let name = qualify(None, b"user.comment").unwrap();
        assert_eq!(&*name, b"user.comment");
        assert!(matches!(name, Cow::Borrowed(_)));

        let name = qualify(Some(b""), b"user.comment").unwrap();
        assert_eq!(&*name, b"user.comment");
        assert!(matches!(name, Cow::Borrowed(_)));
    }

    #[test]
    fn test_qualify_keeps_inner_dots() {
        let name = qualify(Some(NS_TRUSTED), b"overlay.opaque").unwrap();
        assert_eq!(&*name, b"trusted.overlay.opaque");
    }

    #[test]
    fn test_strip_matching() {
        assert_eq!(strip(Some(NS_USER), b"user.comment"), Some(&b"comment"[..]));
        assert_eq!(strip(Some(NS_USER), b"user.a.b"), Some(&b"a.b"[..]));
    }

    #[test]
    fn test_strip_non_matching() {
        assert_eq!(strip(Some(NS_USER), b"system.foo"), None);
        // Prefix without separator
        assert_eq!(strip(Some(NS_USER), b"username.x"), None);
        // Nothing after the separator
        assert_eq!(strip(Some(NS_USER), b"user."), None);
        assert_eq!(strip(Some(NS_USER), b"user"), None);
        assert_eq!(strip(Some(NS_SECURITY), b"sec"), None);
    }

    #[test]
    fn test_strip_without_namespace() {
        assert_eq!(strip(None, b"anything"), Some(&b"anything"[..]));
        assert_eq!(strip(Some(b""), b"system.foo"), Some(&b"system.foo"[..]));
    }

    #[test]
    fn test_qualify_then_strip() {
        for ns in [NS_USER, NS_SYSTEM, NS_TRUSTED, NS_SECURITY] {
            let full = qualify(Some(ns), b"key").unwrap();
            assert_eq!(strip(Some(ns), &full), Some(&b"key"[..]));
        }
    }
}
