//! Public operations: get, set, remove, list and get_all.
//!
//! Each call resolves its [`Item`] into a [`Target`], qualifies the attribute
//! name with the optional namespace, and runs the syscalls through the
//! adaptive buffer fetch. Single-attribute operations either fully succeed
//! or fail; the bulk ones omit attributes that vanish mid-enumeration.

use std::borrow::Cow;
use std::ffi::{CStr, CString};

use libc::c_int;
use tracing::{debug, instrument};

use crate::buffer::{fetch, seeded, DEFAULT_INITIAL_CAPACITY};
use crate::bulk::{self, Entry};
use crate::config::BufferConfig;
use crate::error::{Operation, Result, XattrError};
use crate::namespace::qualify;
use crate::target::{Item, Target, XattrIo};

/// Per-call options shared by every operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options<'a> {
    /// Namespace for bare names; `None` or empty means names are qualified.
    pub namespace: Option<&'a [u8]>,
    /// Act on a symlink itself rather than its target. Ignored for descriptors.
    pub nofollow: bool,
}

impl<'a> Options<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn namespace(mut self, namespace: &'a [u8]) -> Self {
        self.namespace = Some(namespace);
        self
    }

    #[must_use]
    pub fn nofollow(mut self, nofollow: bool) -> Self {
        self.nofollow = nofollow;
        self
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Converts a qualified attribute name to the form the syscalls take.
fn c_name(name: Cow<'_, [u8]>) -> Result<CString> {
    CString::new(name.into_owned()).map_err(|_| {
        XattrError::InvalidArgument("attribute name contains a NUL byte".into())
    })
}

// ============================================================================
// Accessor
// ============================================================================

/// Runs xattr operations with a configured initial buffer capacity.
///
/// The free functions at the crate root use [`Accessor::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    initial_capacity: usize,
}

impl Default for Accessor {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl Accessor {
    #[must_use]
    pub fn new(config: &BufferConfig) -> Self {
        Self {
            initial_capacity: config.initial_capacity,
        }
    }

    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Reads one attribute value. The value may contain any bytes, including
    /// NULs, and has exactly the stored length.
    #[instrument(skip_all, fields(name = %lossy(name), namespace = ?options.namespace.map(lossy)))]
    pub fn get<'i>(
        &self,
        item: impl Into<Item<'i>>,
        name: &[u8],
        options: Options<'_>,
    ) -> Result<Vec<u8>> {
        let target = Target::resolve(item.into(), options.nofollow)?;
        let name = c_name(qualify(options.namespace, name)?)?;
        self.get_value(&target, &name)
    }

    /// Writes one attribute value.
    ///
    /// `flags` is `0` (create or replace), [`crate::XATTR_CREATE`] (fail if it
    /// exists) or [`crate::XATTR_REPLACE`] (fail if it doesn't); it is handed to
    /// the kernel unchanged.
    #[instrument(skip_all, fields(name = %lossy(name), namespace = ?options.namespace.map(lossy), len = value.len(), flags = flags))]
    pub fn set<'i>(
        &self,
        item: impl Into<Item<'i>>,
        name: &[u8],
        value: &[u8],
        flags: c_int,
        options: Options<'_>,
    ) -> Result<()> {
        let target = Target::resolve(item.into(), options.nofollow)?;
        let name = c_name(qualify(options.namespace, name)?)?;
        target
            .set(&name, value, flags)
            .map_err(|err| XattrError::io(Operation::Set, err))?;
        debug!(%target, "attribute set");
        Ok(())
    }

    /// Removes one attribute.
    #[instrument(skip_all, fields(name = %lossy(name), namespace = ?options.namespace.map(lossy)))]
    pub fn remove<'i>(
        &self,
        item: impl Into<Item<'i>>,
        name: &[u8],
        options: Options<'_>,
    ) -> Result<()> {
        let target = Target::resolve(item.into(), options.nofollow)?;
        let name = c_name(qualify(options.namespace, name)?)?;
        target
            .remove(&name)
            .map_err(|err| XattrError::io(Operation::Remove, err))?;
        debug!(%target, "attribute removed");
        Ok(())
    }

    /// Lists attribute names in kernel order.
    ///
    /// With a namespace, only names in it are returned, with the namespace
    /// and separator stripped.
    #[instrument(skip_all, fields(namespace = ?options.namespace.map(lossy)))]
    pub fn list<'i>(&self, item: impl Into<Item<'i>>, options: Options<'_>) -> Result<Vec<Vec<u8>>> {
        let target = Target::resolve(item.into(), options.nofollow)?;
        bulk::list_names(&target, options.namespace, self.initial_capacity)
    }

    /// Reads all attributes as `(name, value)` pairs in kernel order.
    ///
    /// Listing and reading are not atomic: attributes removed between the two
    /// are left out, and any other read failure fails the whole call.
    #[instrument(skip_all, fields(namespace = ?options.namespace.map(lossy)))]
    pub fn get_all<'i>(&self, item: impl Into<Item<'i>>, options: Options<'_>) -> Result<Vec<Entry>> {
        let target = Target::resolve(item.into(), options.nofollow)?;
        bulk::get_all(&target, options.namespace, self.initial_capacity)
    }

    fn get_value(&self, io: &impl XattrIo, name: &CStr) -> Result<Vec<u8>> {
        let mut value = seeded(self.initial_capacity)?;
        let len = fetch(Operation::Get, &mut value, |buf| io.get(name, buf))?;
        value.truncate(len);
        Ok(value)
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Reads one attribute value. See [`Accessor::get`].
pub fn get<'i>(item: impl Into<Item<'i>>, name: &[u8], options: Options<'_>) -> Result<Vec<u8>> {
    Accessor::default().get(item, name, options)
}

/// Writes one attribute value. See [`Accessor::set`].
pub fn set<'i>(
    item: impl Into<Item<'i>>,
    name: &[u8],
    value: &[u8],
    flags: c_int,
    options: Options<'_>,
) -> Result<()> {
    Accessor::default().set(item, name, value, flags, options)
}

/// Removes one attribute. See [`Accessor::remove`].
pub fn remove<'i>(item: impl Into<Item<'i>>, name: &[u8], options: Options<'_>) -> Result<()> {
    Accessor::default().remove(item, name, options)
}

/// Lists attribute names. See [`Accessor::list`].
pub fn list<'i>(item: impl Into<Item<'i>>, options: Options<'_>) -> Result<Vec<Vec<u8>>> {
    Accessor::default().list(item, options)
}

/// Reads all attributes. See [`Accessor::get_all`].
pub fn get_all<'i>(item: impl Into<Item<'i>>, options: Options<'_>) -> Result<Vec<Entry>> {
    Accessor::default().get_all(item, options)
}
