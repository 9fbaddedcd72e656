//! Adaptive buffer fetch protocol.
//!
//! Every get and list operation reads kernel output of unknown, possibly
//! changing size. [`fetch`] drives one syscall primitive against a growable
//! buffer:
//!
//! 1. An empty buffer is sized by probing first (zero-length call). A probe
//!    answer of 0 means an empty value and ends the fetch with no further call.
//! 2. A non-empty buffer (the seeded initial capacity, or one reused across
//!    a bulk enumeration) is used as-is.
//! 3. On `ERANGE` the exact required size is re-probed, the buffer is resized
//!    to it and the fetch retried. Each resize follows an authoritative size
//!    from the kernel, so in practice this converges within two round trips.
//! 4. Any other failure is returned as [`XattrError::Io`].
//!
//! The buffer's length is its capacity as far as the kernel is concerned;
//! callers truncate to the returned byte count when they keep the data.

use std::io;

use tracing::trace;

use crate::error::{Operation, Result, XattrError};

/// Initial buffer capacity used when none is configured.
///
/// Large enough for the vast majority of attribute values and name lists,
/// so the common case is a single syscall.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Allocates a zero-filled buffer of exactly `capacity` bytes.
pub(crate) fn seeded(capacity: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    resize_exact(&mut buf, capacity)?;
    Ok(buf)
}

fn resize_exact(buf: &mut Vec<u8>, size: usize) -> Result<()> {
    if size > buf.len() {
        buf.try_reserve_exact(size - buf.len())
            .map_err(|_| XattrError::OutOfMemory { requested: size })?;
    }
    buf.resize(size, 0);
    Ok(())
}

fn probe<F>(op: Operation, call: &mut F) -> Result<usize>
where
    F: FnMut(&mut [u8]) -> io::Result<usize>,
{
    call(&mut []).map_err(|err| XattrError::io(op, err))
}

/// Runs `call` against `buf`, growing it until the kernel output fits.
///
/// `call` receives the buffer to fill; an empty slice means "report the
/// required size". Returns the number of valid bytes at the start of `buf`.
pub fn fetch<F>(op: Operation, buf: &mut Vec<u8>, mut call: F) -> Result<usize>
where
    F: FnMut(&mut [u8]) -> io::Result<usize>,
{
    if buf.is_empty() {
        let required = probe(op, &mut call)?;
        trace!(%op, required, "probed size");
        if required == 0 {
            return Ok(0);
        }
        resize_exact(buf, required)?;
    }

    loop {
        match call(buf.as_mut_slice()) {
            Ok(written) => return Ok(written),
            Err(err) if err.raw_os_error() == Some(libc::ERANGE) => {
                let required = probe(op, &mut call)?;
                trace!(%op, capacity = buf.len(), required, "buffer too small, resizing");
                if required == 0 {
                    // Shrunk to empty between the two calls.
                    return Ok(0);
                }
                resize_exact(buf, required)?;
            }
            Err(err) => return Err(XattrError::io(op, err)),
        }
    }
}
