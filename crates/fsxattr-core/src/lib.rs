//! fsxattr core - extended attribute access layer
//!
//! This crate reads and writes POSIX extended attributes on paths, symlinks
//! and open descriptors, with:
//! - **Targets** - `Item` inputs resolved to `Target` kinds, each routed to the
//!   matching syscall variant (`target`, `sys`)
//! - **Namespaces** - `user`/`system`/`trusted`/`security` qualification and
//!   stripping of attribute names (`namespace`)
//! - **Adaptive buffers** - one retry-on-`ERANGE` fetch routine for every
//!   get and list (`buffer`)
//! - **Bulk reads** - `get_all` tolerant of attributes that vanish between
//!   listing and reading (`bulk`)
//!
//! # Example
//!
//! ```rust,no_run
//! use fsxattr_core::{Options, NS_USER};
//!
//! # fn main() -> fsxattr_core::Result<()> {
//! fsxattr_core::set("/tmp/file", b"comment", b"hello", 0, Options::new().namespace(NS_USER))?;
//! let value = fsxattr_core::get("/tmp/file", b"user.comment", Options::new())?;
//! assert_eq!(value, b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! All calls are synchronous and blocking; no state is shared between them.

pub mod buffer;
pub mod bulk;
pub mod compat;
pub mod config;
pub mod error;
pub mod namespace;
pub mod ops;
pub mod sys;
pub mod target;

pub use buffer::DEFAULT_INITIAL_CAPACITY;
pub use bulk::Entry;
pub use error::{Operation, Result, XattrError};
pub use namespace::{NS_SECURITY, NS_SYSTEM, NS_TRUSTED, NS_USER};
pub use ops::{get, get_all, list, remove, set, Accessor, Options};
pub use sys::{XATTR_CREATE, XATTR_REPLACE};
pub use target::{Item, Target, XattrIo};
