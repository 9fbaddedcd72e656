//! Platform syscall adapter.
//!
//! Normalizes the Linux and Apple xattr calling conventions into one set of
//! primitives: list/get/set/remove for a path, a path without following
//! symlinks, and an open descriptor.
//!
//! ## Conventions
//!
//! - An empty output buffer is passed to the kernel as `(NULL, 0)`, which asks
//!   for the required size instead of the data ("probe mode").
//! - Failures are returned as `io::Error::last_os_error()`; no retrying or
//!   buffer growth happens at this level.

use std::ffi::CStr;
use std::io;
use std::os::unix::io::RawFd;
use std::ptr;

use libc::{c_char, c_int, c_void, size_t, ssize_t};

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(any(target_os = "linux", target_os = "android"))]
use self::linux as platform;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod macos;
#[cfg(any(target_os = "macos", target_os = "ios"))]
use self::macos as platform;

pub use self::platform::{ENOATTR, XATTR_CREATE, XATTR_REPLACE};

/// Whether `code` reports a missing attribute. Apple uses both `ENOATTR`
/// and `ENODATA` for it; on Linux they are the same value.
#[must_use]
pub fn is_missing(code: c_int) -> bool {
    code == ENOATTR || code == libc::ENODATA
}

fn out_ptr(buf: &mut [u8]) -> (*mut c_void, size_t) {
    if buf.is_empty() {
        (ptr::null_mut(), 0)
    } else {
        (buf.as_mut_ptr().cast(), buf.len())
    }
}

fn check_size(ret: ssize_t) -> io::Result<usize> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

fn check_unit(ret: c_int) -> io::Result<()> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

// ============================================================================
// list
// ============================================================================

pub fn list_path(path: &CStr, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: `path` is NUL-terminated and `out` is valid for `len` bytes (or NULL/0).
    check_size(unsafe { platform::listxattr(path.as_ptr(), out.cast::<c_char>(), len) })
}

pub fn list_link(path: &CStr, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: as above.
    check_size(unsafe { platform::llistxattr(path.as_ptr(), out.cast::<c_char>(), len) })
}

pub fn list_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: `out` is valid for `len` bytes (or NULL/0); a bad fd yields EBADF.
    check_size(unsafe { platform::flistxattr(fd, out.cast::<c_char>(), len) })
}

// ============================================================================
// get
// ============================================================================

pub fn get_path(path: &CStr, name: &CStr, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: both strings are NUL-terminated and `out` is valid for `len` bytes.
    check_size(unsafe { platform::getxattr(path.as_ptr(), name.as_ptr(), out, len) })
}

pub fn get_link(path: &CStr, name: &CStr, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: as above.
    check_size(unsafe { platform::lgetxattr(path.as_ptr(), name.as_ptr(), out, len) })
}

pub fn get_fd(fd: RawFd, name: &CStr, buf: &mut [u8]) -> io::Result<usize> {
    let (out, len) = out_ptr(buf);
    // SAFETY: as above.
    check_size(unsafe { platform::fgetxattr(fd, name.as_ptr(), out, len) })
}

// ============================================================================
// set
// ============================================================================

pub fn set_path(path: &CStr, name: &CStr, value: &[u8], flags: c_int) -> io::Result<()> {
    // SAFETY: both strings are NUL-terminated and `value` is valid for its length.
    check_unit(unsafe {
        platform::setxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_ptr().cast(),
            value.len(),
            flags,
        )
    })
}

pub fn set_link(path: &CStr, name: &CStr, value: &[u8], flags: c_int) -> io::Result<()> {
    // SAFETY: as above.
    check_unit(unsafe {
        platform::lsetxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_ptr().cast(),
            value.len(),
            flags,
        )
    })
}

pub fn set_fd(fd: RawFd, name: &CStr, value: &[u8], flags: c_int) -> io::Result<()> {
    // SAFETY: as above.
    check_unit(unsafe {
        platform::fsetxattr(fd, name.as_ptr(), value.as_ptr().cast(), value.len(), flags)
    })
}

// ============================================================================
// remove
// ============================================================================

pub fn remove_path(path: &CStr, name: &CStr) -> io::Result<()> {
    // SAFETY: both strings are NUL-terminated.
    check_unit(unsafe { platform::removexattr(path.as_ptr(), name.as_ptr()) })
}

pub fn remove_link(path: &CStr, name: &CStr) -> io::Result<()> {
    // SAFETY: as above.
    check_unit(unsafe { platform::lremovexattr(path.as_ptr(), name.as_ptr()) })
}

pub fn remove_fd(fd: RawFd, name: &CStr) -> io::Result<()> {
    // SAFETY: as above.
    check_unit(unsafe { platform::fremovexattr(fd, name.as_ptr()) })
}
