//! Target resolution and per-kind dispatch.
//!
//! An [`Item`] is whatever the caller hands in: a path in one of several
//! representations, or an open descriptor. [`Target::resolve`] turns it into
//! exactly one of three kinds and owns the NUL-terminated copy of the path
//! that the syscalls need, so the copy is released on every exit path.
//!
//! Descriptors are borrowed: they are never duplicated or closed here.

use std::ffi::{CStr, CString, OsStr};
use std::fmt;
use std::fs::File;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, BorrowedFd, RawFd};
use std::path::{Path, PathBuf};

use libc::c_int;

use crate::error::{Result, XattrError};
use crate::sys;

// ============================================================================
// Item: caller-facing input
// ============================================================================

/// The filesystem object to act on, as supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    /// A filesystem path.
    Path(&'a Path),
    /// A path as raw filesystem bytes.
    Bytes(&'a [u8]),
    /// A path as UTF-8 text.
    Text(&'a str),
    /// A path as UTF-16 text, as produced by some language runtimes.
    Wide(&'a [u16]),
    /// An open file descriptor.
    Fd(RawFd),
}

impl<'a> Item<'a> {
    /// Uses the descriptor of anything that owns one, such as an open file.
    pub fn from_fd_owner<T: AsRawFd + ?Sized>(owner: &'a T) -> Self {
        Item::Fd(owner.as_raw_fd())
    }
}

impl<'a> From<&'a Path> for Item<'a> {
    fn from(path: &'a Path) -> Self {
        Item::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Item<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Item::Path(path.as_path())
    }
}

impl<'a> From<&'a OsStr> for Item<'a> {
    fn from(path: &'a OsStr) -> Self {
        Item::Path(Path::new(path))
    }
}

impl<'a> From<&'a str> for Item<'a> {
    fn from(path: &'a str) -> Self {
        Item::Text(path)
    }
}

impl<'a> From<&'a String> for Item<'a> {
    fn from(path: &'a String) -> Self {
        Item::Text(path.as_str())
    }
}

impl<'a> From<&'a [u8]> for Item<'a> {
    fn from(path: &'a [u8]) -> Self {
        Item::Bytes(path)
    }
}

impl<'a> From<&'a [u16]> for Item<'a> {
    fn from(path: &'a [u16]) -> Self {
        Item::Wide(path)
    }
}

impl From<RawFd> for Item<'_> {
    fn from(fd: RawFd) -> Self {
        Item::Fd(fd)
    }
}

impl<'a> From<BorrowedFd<'a>> for Item<'a> {
    fn from(fd: BorrowedFd<'a>) -> Self {
        Item::Fd(fd.as_raw_fd())
    }
}

impl<'a> From<&'a File> for Item<'a> {
    fn from(file: &'a File) -> Self {
        Item::from_fd_owner(file)
    }
}

// ============================================================================
// Target: resolved kind
// ============================================================================

/// A resolved target, routing each operation to one syscall variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Follow symlinks.
    Path(CString),
    /// Act on a symlink itself.
    SymlinkPath(CString),
    /// Act on an open descriptor.
    Descriptor(RawFd),
}

impl Target {
    /// Resolves an item. `nofollow` selects [`Target::SymlinkPath`] for
    /// path-like items and is ignored for descriptors.
    ///
    /// # Errors
    ///
    /// - [`XattrError::InvalidArgument`] for a negative descriptor, an empty
    ///   path or a path with an interior NUL byte.
    /// - [`XattrError::Encoding`] for wide text that is not valid UTF-16.
    pub fn resolve(item: Item<'_>, nofollow: bool) -> Result<Self> {
        let path = match item {
            Item::Fd(fd) if fd < 0 => {
                return Err(XattrError::InvalidArgument(format!(
                    "invalid file descriptor {fd}"
                )))
            }
            Item::Fd(fd) => return Ok(Target::Descriptor(fd)),
            Item::Path(path) => to_cstring(path.as_os_str().as_bytes())?,
            Item::Bytes(bytes) => to_cstring(bytes)?,
            Item::Text(text) => to_cstring(text.as_bytes())?,
            Item::Wide(wide) => {
                let text = String::from_utf16(wide).map_err(|err| {
                    XattrError::Encoding(format!("path is not valid UTF-16: {err}"))
                })?;
                to_cstring(text.as_bytes())?
            }
        };

        Ok(if nofollow {
            Target::SymlinkPath(path)
        } else {
            Target::Path(path)
        })
    }
}

fn to_cstring(bytes: &[u8]) -> Result<CString> {
    if bytes.is_empty() {
        return Err(XattrError::InvalidArgument("empty path".into()));
    }
    CString::new(bytes)
        .map_err(|_| XattrError::InvalidArgument("path contains a NUL byte".into()))
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(path) => write!(f, "{}", path.to_string_lossy()),
            Target::SymlinkPath(path) => write!(f, "{} (nofollow)", path.to_string_lossy()),
            Target::Descriptor(fd) => write!(f, "fd {fd}"),
        }
    }
}

// ============================================================================
// XattrIo: dispatch seam
// ============================================================================

/// The four raw xattr primitives for one resolved target.
///
/// Empty output buffers request the required size instead of data.
pub trait XattrIo {
    fn list(&self, buf: &mut [u8]) -> io::Result<usize>;
    fn get(&self, name: &CStr, buf: &mut [u8]) -> io::Result<usize>;
    fn set(&self, name: &CStr, value: &[u8], flags: c_int) -> io::Result<()>;
    fn remove(&self, name: &CStr) -> io::Result<()>;
}

impl XattrIo for Target {
    fn list(&self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Target::Path(path) => sys::list_path(path, buf),
            Target::SymlinkPath(path) => sys::list_link(path, buf),
            Target::Descriptor(fd) => sys::list_fd(*fd, buf),
        }
    }

    fn get(&self, name: &CStr, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Target::Path(path) => sys::get_path(path, name, buf),
            Target::SymlinkPath(path) => sys::get_link(path, name, buf),
            Target::Descriptor(fd) => sys::get_fd(*fd, name, buf),
        }
    }

    fn set(&self, name: &CStr, value: &[u8], flags: c_int) -> io::Result<()> {
        match self {
            Target::Path(path) => sys::set_path(path, name, value, flags),
            Target::SymlinkPath(path) => sys::set_link(path, name, value, flags),
            Target::Descriptor(fd) => sys::set_fd(*fd, name, value, flags),
        }
    }

    fn remove(&self, name: &CStr) -> io::Result<()> {
        match self {
            Target::Path(path) => sys::remove_path(path, name),
            Target::SymlinkPath(path) => sys::remove_link(path, name),
            Target::Descriptor(fd) => sys::remove_fd(*fd, name),
        }
    }
}
