//! Memory protection for seed and key material
//!
//! Two hardening measures, both best-effort:
//!
//! 1. **Core dump prevention**: `setrlimit(RLIMIT_CORE, 0)` so a crash in the
//!    middle of a batch never writes mnemonics or seeds to disk.
//!
//! 2. **Locked buffers**: [`LockedBytes`] keeps a fixed-size secret on the heap,
//!    `mlock`s the page range so it cannot be swapped out, and zeroizes it on
//!    drop before unlocking.
//!
//! Failures are logged and otherwise ignored. Containers and unprivileged
//! users frequently cannot raise `RLIMIT_MEMLOCK`.

use std::sync::atomic::{AtomicBool, Ordering};
use zeroize::Zeroize;

static CORE_DUMPS_DISABLED: AtomicBool = AtomicBool::new(false);
static MLOCK_FAILURE_REPORTED: AtomicBool = AtomicBool::new(false);

/// Disable core dumps for the current process.
///
/// Call once, early in `main`. Returns `true` if core dumps are off
/// (including when a previous call already turned them off).
///
/// # Example
/// ```
/// walletgen_core::memory::disable_core_dumps();
/// ```
pub fn disable_core_dumps() -> bool {
    if CORE_DUMPS_DISABLED.swap(true, Ordering::SeqCst) {
        return true;
    }

    #[cfg(unix)]
    {
        unix::disable_core_dumps_impl()
    }

    #[cfg(not(unix))]
    {
        log::warn!("core dump prevention not supported on this platform");
        false
    }
}

/// A fixed-size secret buffer that is locked in RAM and wiped on drop.
///
/// The bytes live behind a `Box` so the locked address stays stable when the
/// wrapper itself is moved.
///
/// # Example
/// ```
/// use walletgen_core::memory::LockedBytes;
/// let mut buf = LockedBytes::<32>::zeroed();
/// buf.as_mut()[0] = 0xAA;
/// assert_eq!(buf.as_ref()[0], 0xAA);
/// ```
pub struct LockedBytes<const N: usize> {
    data: Box<[u8; N]>,
    locked: bool,
}

impl<const N: usize> LockedBytes<N> {
    /// Allocate a zero-filled buffer and try to lock it.
    pub fn zeroed() -> Self {
        let data = Box::new([0u8; N]);
        let locked = lock_region(data.as_ptr(), N);
        if !locked {
            report_lock_failure(N);
        }
        Self { data, locked }
    }

    /// Copy `bytes` into a fresh locked buffer and wipe the passed-in copy.
    pub fn from_array(mut bytes: [u8; N]) -> Self {
        let mut buf = Self::zeroed();
        buf.data.copy_from_slice(&bytes);
        bytes.zeroize();
        buf
    }

    /// Whether `mlock` succeeded for this buffer.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl<const N: usize> AsRef<[u8; N]> for LockedBytes<N> {
    fn as_ref(&self) -> &[u8; N] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8; N]> for LockedBytes<N> {
    fn as_mut(&mut self) -> &mut [u8; N] {
        &mut self.data
    }
}

impl<const N: usize> Drop for LockedBytes<N> {
    fn drop(&mut self) {
        self.data.zeroize();
        if self.locked {
            unlock_region(self.data.as_ptr(), N);
        }
    }
}

impl<const N: usize> std::fmt::Debug for LockedBytes<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedBytes")
            .field("len", &N)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

/// Warn on the first failed `mlock` only. A batch allocates one locked seed
/// per wallet, so later failures go to `debug`.
fn report_lock_failure(len: usize) -> log::Level {
    if MLOCK_FAILURE_REPORTED.swap(true, Ordering::SeqCst) {
        log::debug!("failed to mlock {} secret bytes", len);
        log::Level::Debug
    } else {
        log::warn!(
            "failed to mlock {} secret bytes; secrets may be swapped to disk \
             (further failures are logged at debug level)",
            len
        );
        log::Level::Warn
    }
}

fn lock_region(ptr: *const u8, len: usize) -> bool {
    if len == 0 {
        return true;
    }

    #[cfg(unix)]
    {
        // SAFETY: ptr/len describe a live allocation owned by the caller.
        unsafe { unix::mlock_impl(ptr, len) }
    }

    #[cfg(not(unix))]
    {
        let _ = ptr;
        false
    }
}

fn unlock_region(ptr: *const u8, len: usize) {
    if len == 0 {
        return;
    }

    #[cfg(unix)]
    {
        // SAFETY: only called from Drop with the region locked in zeroed().
        unsafe {
            unix::munlock_impl(ptr, len);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ptr;
    }
}

#[cfg(unix)]
mod unix {
    pub fn disable_core_dumps_impl() -> bool {
        let rlim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: plain POSIX call on a stack-allocated struct.
        let result = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &rlim) };
        if result != 0 {
            log::warn!(
                "failed to disable core dumps: {}",
                std::io::Error::last_os_error()
            );
            return false;
        }
        true
    }

    pub unsafe fn mlock_impl(ptr: *const u8, len: usize) -> bool {
        libc::mlock(ptr as *const libc::c_void, len) == 0
    }

    pub unsafe fn munlock_impl(ptr: *const u8, len: usize) -> bool {
        libc::munlock(ptr as *const libc::c_void, len) == 0
    }
}
