//! Error types for extended attribute access.
//!
//! Defines `XattrError`, the operation tag carried by I/O failures, and
//! conversions to libc errno values for callers that speak errno.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::sys;

/// The kind of syscall that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Set,
    Remove,
    List,
}

impl Operation {
    /// Lowercase name, as used in log fields and CLI messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Remove => "remove",
            Operation::List => "list",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while accessing extended attributes.
#[derive(Error, Debug)]
pub enum XattrError {
    /// The target or attribute name cannot be handed to the OS.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A wide or text path could not be converted to filesystem bytes.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Namespace qualification produced a name of unexpected length.
    #[error("can't format the attribute name: expected {expected} bytes, got {actual}")]
    Format { expected: usize, actual: usize },

    /// A syscall failed; carries the OS error verbatim.
    #[error("{op} failed: {source}")]
    Io {
        op: Operation,
        #[source]
        source: io::Error,
    },

    /// Growing an attribute buffer failed.
    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory { requested: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XattrError>;

impl XattrError {
    pub(crate) fn io(op: Operation, source: io::Error) -> Self {
        XattrError::Io { op, source }
    }

    /// The operation tag, for I/O failures.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            XattrError::Io { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// The raw OS error code, for I/O failures.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            XattrError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// The attribute does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.errno().is_some_and(sys::is_missing)
    }

    /// The value or list exceeds what the filesystem allows.
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        matches!(self.errno(), Some(libc::E2BIG) | Some(libc::ERANGE))
    }

    /// The filesystem (or the target kind) does not support extended attributes.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self.errno(), Some(code) if code == libc::ENOTSUP || code == libc::EOPNOTSUPP)
    }

    /// Out of space or over quota.
    #[must_use]
    pub fn is_no_space(&self) -> bool {
        matches!(self.errno(), Some(libc::ENOSPC) | Some(libc::EDQUOT))
    }

    /// The attribute name is too long.
    #[must_use]
    pub fn is_name_too_long(&self) -> bool {
        self.errno() == Some(libc::ENAMETOOLONG)
    }

    /// The attribute already exists (create-only set).
    #[must_use]
    pub fn is_exists(&self) -> bool {
        self.errno() == Some(libc::EEXIST)
    }
}

impl From<XattrError> for libc::c_int {
    fn from(err: XattrError) -> libc::c_int {
        match err {
            XattrError::InvalidArgument(_) => libc::EINVAL,
            XattrError::Encoding(_) => libc::EILSEQ,
            XattrError::Format { .. } => libc::EINVAL,
            XattrError::Io { source, .. } => source.raw_os_error().unwrap_or(libc::EIO),
            XattrError::OutOfMemory { .. } => libc::ENOMEM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_error(op: Operation, code: i32) -> XattrError {
        XattrError::io(op, io::Error::from_raw_os_error(code))
    }

    #[test]
    fn test_classification() {
        assert!(os_error(Operation::Get, sys::ENOATTR).is_not_found());
        assert!(os_error(Operation::Get, libc::ENODATA).is_not_found());
        assert!(os_error(Operation::Set, libc::E2BIG).is_too_large());
        assert!(os_error(Operation::Set, libc::ENOTSUP).is_unsupported());
        assert!(os_error(Operation::Set, libc::EDQUOT).is_no_space());
        assert!(os_error(Operation::Set, libc::ENAMETOOLONG).is_name_too_long());
        assert!(os_error(Operation::Set, libc::EEXIST).is_exists());
        assert!(!os_error(Operation::Get, libc::EACCES).is_not_found());
        assert!(!XattrError::InvalidArgument("x".into()).is_not_found());
    }

    #[test]
    fn test_operation_tag() {
        let err = os_error(Operation::Remove, libc::EPERM);
        assert_eq!(err.operation(), Some(Operation::Remove));
        assert_eq!(err.errno(), Some(libc::EPERM));
        assert!(err.to_string().starts_with("remove failed:"));

        assert_eq!(XattrError::OutOfMemory { requested: 8 }.operation(), None);
    }

    #[test]
    fn test_errno_conversion() {
        assert_eq!(
            libc::c_int::from(XattrError::InvalidArgument("fd".into())),
            libc::EINVAL
        );
        assert_eq!(
            libc::c_int::from(XattrError::Encoding("surrogate".into())),
            libc::EILSEQ
        );
        assert_eq!(
            libc::c_int::from(XattrError::OutOfMemory { requested: 1 }),
            libc::ENOMEM
        );
        assert_eq!(
            libc::c_int::from(os_error(Operation::List, libc::ENOTSUP)),
            libc::ENOTSUP
        );
        let custom = XattrError::io(Operation::Get, io::Error::new(io::ErrorKind::Other, "x"));
        assert_eq!(libc::c_int::from(custom), libc::EIO);
    }

    #[test]
    fn test_error_display() {
        let err = XattrError::Format {
            expected: 10,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "can't format the attribute name: expected 10 bytes, got 9"
        );
        assert_eq!(Operation::List.to_string(), "list");
    }
}
