//! Page preparation for the pre-allocated tables
//!
//! Optional latency-variance tuning applied once at construction: advising
//! transparent huge pages and touching every page so the first order does
//! not pay for page faults. Neither changes observable behavior.

use std::mem;

use tracing::debug;

const FALLBACK_PAGE_SIZE: usize = 4096;

/// Which preparation steps to run on a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub huge_pages: bool,
    pub prefault: bool,
}

/// System page size
pub fn page_size() -> usize {
    #[cfg(unix)]
    {
        // SAFETY: sysconf has no preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 {
            return size as usize;
        }
    }
    FALLBACK_PAGE_SIZE
}

/// Run the requested steps over one table
pub fn prepare<T: Copy>(table: &mut [T], options: PageOptions) {
    if options.huge_pages {
        advise_huge_pages(table);
    }
    if options.prefault {
        prefault(table);
    }
}

/// Ask the kernel to back `table` with transparent huge pages
///
/// Only whole pages inside the table are advised. Returns false if the
/// advice was not applied (unsupported platform, table too small, or the
/// kernel refused).
pub fn advise_huge_pages<T>(table: &mut [T]) -> bool {
    #[cfg(target_os = "linux")]
    {
        let page = page_size();
        let start = table.as_mut_ptr() as usize;
        let end = start + mem::size_of_val(table);
        let aligned_start = start.next_multiple_of(page);
        let aligned_end = end - end % page;
        if aligned_end <= aligned_start {
            return false;
        }

        // SAFETY: the range lies entirely inside `table`, which we borrow
        // mutably, and MADV_HUGEPAGE does not alter its contents.
        let rc = unsafe {
            libc::madvise(
                aligned_start as *mut libc::c_void,
                aligned_end - aligned_start,
                libc::MADV_HUGEPAGE,
            )
        };
        if rc != 0 {
            debug!(
                error = %std::io::Error::last_os_error(),
                bytes = aligned_end - aligned_start,
                "madvise(MADV_HUGEPAGE) refused"
            );
            return false;
        }
        true
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = table;
        false
    }
}

/// Touch one element per page so every page is resident
///
/// Returns the number of elements written.
pub fn prefault<T: Copy>(table: &mut [T]) -> usize {
    let size = mem::size_of::<T>();
    if size == 0 || table.is_empty() {
        return 0;
    }
    let stride = (page_size() / size).max(1);
    let mut touched = 0;
    for i in (0..table.len()).step_by(stride) {
        let slot = &mut table[i];
        let value = *slot;
        // SAFETY: `slot` is a valid, aligned, exclusive reference.
        unsafe { std::ptr::write_volatile(slot, value) };
        touched += 1;
    }
    touched
}
