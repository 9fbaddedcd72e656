//! Apple convention: a `position` argument (always 0 here) and an `options`
//! argument that carries `XATTR_NOFOLLOW` for the symlink variants.

use libc::{c_char, c_int, c_void, size_t, ssize_t, XATTR_NOFOLLOW};

pub use libc::{ENOATTR, XATTR_CREATE, XATTR_REPLACE};

pub unsafe fn listxattr(path: *const c_char, list: *mut c_char, size: size_t) -> ssize_t {
    libc::listxattr(path, list, size, 0)
}

pub unsafe fn llistxattr(path: *const c_char, list: *mut c_char, size: size_t) -> ssize_t {
    libc::listxattr(path, list, size, XATTR_NOFOLLOW)
}

pub unsafe fn flistxattr(fd: c_int, list: *mut c_char, size: size_t) -> ssize_t {
    libc::flistxattr(fd, list, size, 0)
}

pub unsafe fn getxattr(
    path: *const c_char,
    name: *const c_char,
    value: *mut c_void,
    size: size_t,
) -> ssize_t {
    libc::getxattr(path, name, value, size, 0, 0)
}

pub unsafe fn lgetxattr(
    path: *const c_char,
    name: *const c_char,
    value: *mut c_void,
    size: size_t,
) -> ssize_t {
    libc::getxattr(path, name, value, size, 0, XATTR_NOFOLLOW)
}

pub unsafe fn fgetxattr(
    fd: c_int,
    name: *const c_char,
    value: *mut c_void,
    size: size_t,
) -> ssize_t {
    libc::fgetxattr(fd, name, value, size, 0, 0)
}

pub unsafe fn setxattr(
    path: *const c_char,
    name: *const c_char,
    value: *const c_void,
    size: size_t,
    flags: c_int,
) -> c_int {
    libc::setxattr(path, name, value, size, 0, flags)
}

pub unsafe fn lsetxattr(
    path: *const c_char,
    name: *const c_char,
    value: *const c_void,
    size: size_t,
    flags: c_int,
) -> c_int {
    libc::setxattr(path, name, value, size, 0, flags | XATTR_NOFOLLOW)
}

pub unsafe fn fsetxattr(
    fd: c_int,
    name: *const c_char,
    value: *const c_void,
    size: size_t,
    flags: c_int,
) -> c_int {
    libc::fsetxattr(fd, name, value, size, 0, flags)
}

pub unsafe fn removexattr(path: *const c_char, name: *const c_char) -> c_int {
    libc::removexattr(path, name, 0)
}

pub unsafe fn lremovexattr(path: *const c_char, name: *const c_char) -> c_int {
    libc::removexattr(path, name, XATTR_NOFOLLOW)
}

pub unsafe fn fremovexattr(fd: c_int, name: *const c_char) -> c_int {
    libc::fremovexattr(fd, name, 0)
}
