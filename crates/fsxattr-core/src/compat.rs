//! Flat, namespace-less API.
//!
//! These predate namespace support: names are always fully qualified and the
//! symlink flag is a positional argument. New code should use [`crate::get`]
//! and friends with [`crate::Options`].

#![allow(deprecated)]

use libc::c_int;

use crate::error::Result;
use crate::ops::{self, Options};
use crate::target::Item;

fn plain(nofollow: bool) -> Options<'static> {
    Options::new().nofollow(nofollow)
}

/// Reads the value of a fully qualified attribute.
#[deprecated(since = "0.1.0", note = "use `fsxattr_core::get`")]
pub fn getxattr<'i>(item: impl Into<Item<'i>>, name: &[u8], nofollow: bool) -> Result<Vec<u8>> {
    ops::get(item, name, plain(nofollow))
}

/// Sets a fully qualified attribute; `flags` as for [`crate::set`].
#[deprecated(since = "0.1.0", note = "use `fsxattr_core::set`")]
pub fn setxattr<'i>(
    item: impl Into<Item<'i>>,
    name: &[u8],
    value: &[u8],
    flags: c_int,
    nofollow: bool,
) -> Result<()> {
    ops::set(item, name, value, flags, plain(nofollow))
}

/// Removes a fully qualified attribute.
#[deprecated(since = "0.1.0", note = "use `fsxattr_core::remove`")]
pub fn removexattr<'i>(item: impl Into<Item<'i>>, name: &[u8], nofollow: bool) -> Result<()> {
    ops::remove(item, name, plain(nofollow))
}

/// Lists all attribute names, unfiltered.
#[deprecated(since = "0.1.0", note = "use `fsxattr_core::list`")]
pub fn listxattr<'i>(item: impl Into<Item<'i>>, nofollow: bool) -> Result<Vec<Vec<u8>>> {
    ops::list(item, plain(nofollow))
}
