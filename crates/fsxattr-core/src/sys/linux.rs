//! Linux convention: one function per target kind, no options argument.

pub use libc::{
    fgetxattr, flistxattr, fremovexattr, fsetxattr, getxattr, lgetxattr, listxattr, llistxattr,
    lremovexattr, lsetxattr, removexattr, setxattr,
};
pub use libc::{XATTR_CREATE, XATTR_REPLACE};

/// Linux reports a missing attribute as `ENODATA`.
pub const ENOATTR: libc::c_int = libc::ENODATA;
