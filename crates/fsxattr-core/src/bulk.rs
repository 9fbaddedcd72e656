//! Attribute listing and bulk enumeration.
//!
//! Listing and reading are separate syscalls, so a bulk read is not an atomic
//! snapshot: an attribute can disappear between the two. Such attributes are
//! skipped. Any other failure while reading a value aborts the enumeration and
//! discards what was collected so far.

use std::ffi::CStr;

use tracing::debug;

use crate::buffer::{fetch, seeded};
use crate::error::{Operation, Result};
use crate::namespace::strip;
use crate::sys;
use crate::target::XattrIo;

/// A `(name, value)` pair. The name is namespace-stripped when a namespace
/// filter was given.
pub type Entry = (Vec<u8>, Vec<u8>);

/// Iterator over the NUL-terminated names packed in a kernel list buffer.
///
/// Stops exactly at the end of the slice it was built from, so callers pass
/// only the bytes the kernel reported as written.
#[derive(Debug, Clone)]
pub struct AttrNames<'a> {
    rest: &'a [u8],
}

impl<'a> AttrNames<'a> {
    #[must_use]
    pub fn new(list: &'a [u8]) -> Self {
        Self { rest: list }
    }
}

impl<'a> Iterator for AttrNames<'a> {
    type Item = &'a CStr;

    fn next(&mut self) -> Option<&'a CStr> {
        loop {
            let end = self.rest.iter().position(|&b| b == 0)?;
            let (chunk, rest) = self.rest.split_at(end + 1);
            self.rest = rest;
            if end == 0 {
                continue;
            }
            return CStr::from_bytes_with_nul(chunk).ok();
        }
    }
}

/// Fetches the raw name list into a buffer seeded at `initial_capacity`.
fn read_list(io: &impl XattrIo, initial_capacity: usize) -> Result<Vec<u8>> {
    let mut list = seeded(initial_capacity)?;
    let len = fetch(Operation::List, &mut list, |buf| io.list(buf))?;
    list.truncate(len);
    Ok(list)
}

/// Lists attribute names, filtered and stripped by `namespace`.
pub fn list_names(
    io: &impl XattrIo,
    namespace: Option<&[u8]>,
    initial_capacity: usize,
) -> Result<Vec<Vec<u8>>> {
    let list = read_list(io, initial_capacity)?;
    Ok(AttrNames::new(&list)
        .filter_map(|name| strip(namespace, name.to_bytes()))
        .map(<[u8]>::to_vec)
        .collect())
}

/// Reads every attribute name and value, filtered and stripped by `namespace`.
///
/// Entries come back in the order the kernel listed them.
pub fn get_all(
    io: &impl XattrIo,
    namespace: Option<&[u8]>,
    initial_capacity: usize,
) -> Result<Vec<Entry>> {
    let list = read_list(io, initial_capacity)?;
    let mut value = seeded(initial_capacity)?;
    let mut entries = Vec::new();
    let mut vanished = 0usize;

    for name in AttrNames::new(&list) {
        let Some(shown) = strip(namespace, name.to_bytes()) else {
            continue;
        };

        let len = match fetch(Operation::Get, &mut value, |buf| io.get(name, buf)) {
            Ok(len) => len,
            Err(err) if err.errno().is_some_and(sys::is_missing) => {
                debug!(name = %name.to_string_lossy(), "attribute vanished after listing");
                vanished += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        entries.push((shown.to_vec(), value[..len].to_vec()));
    }

    debug!(count = entries.len(), vanished, "bulk enumeration complete");
    Ok(entries)
}
