// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Reusable scratch buffers for building records.

Emitters render a whole record into a buffer before taking the sink lock.  The
buffers come from a small shared pool so that steady-state logging does not
allocate per call.
*/

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

const INITIAL_CAPACITY: usize = 1024;
//buffers that grew past this are dropped instead of pooled
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;
const MAX_POOLED: usize = 32;

static SHARED: BufferPool = BufferPool::new();

/// The process-wide pool used by the built-in emitters.
pub(crate) fn shared() -> &'static BufferPool {
    &SHARED
}

#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferPool {
    pub const fn new() -> Self {
        BufferPool {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Takes the most recently returned buffer, or allocates one.
    ///
    /// The buffer is empty.  It goes back to the pool when the guard drops.
    pub fn get(&self) -> PooledBuffer<'_> {
        let buf = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(INITIAL_CAPACITY));
        PooledBuffer { pool: self, buf }
    }

    fn put(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < MAX_POOLED {
            free.push(buf);
        }
    }

    /// Number of idle buffers.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// A buffer on loan from a [`BufferPool`].
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}
