//! Success oracle for wrapped tools.
//!
//! Some of the tools the installer drives exit 0 on failure, and some exit
//! non-zero on cosmetic warnings. A step therefore counts as successful only
//! when the process exits 0 *and* a known marker appears in its output.

use super::CommandResult;

/// Whether `result` exited 0 and its combined output contains `marker`.
pub fn succeeded(result: &CommandResult, marker: &str) -> bool {
    result.exited_ok() && result.combined().contains(marker)
}
