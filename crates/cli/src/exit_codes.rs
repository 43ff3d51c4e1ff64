//! CLI Exit Code Registry
//!
//! Single source of truth for `namelink` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | `diff` found unreconciled names                 |
//! | 2    | Usage error (bad args, unreadable input file)   |
//! | 3    | Invalid run configuration                       |
//! | 4    | A selection references an undefined list        |
//! | 5    | Output could not be written                     |

use namelink_linkage::LinkError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Differences found. Like `diff(1)`, exit 1 means "lists differ."
pub const EXIT_DIFFERENCES: u8 = 1;

/// Usage error - bad arguments, missing or unreadable input.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse, or threshold/coverage/selection out of range.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Selected list is not defined in the run file.
pub const EXIT_UNKNOWN_LIST: u8 = 4;

/// Writing JSON/CSV output failed.
pub const EXIT_OUTPUT: u8 = 5;

pub fn link_exit_code(err: &LinkError) -> u8 {
    match err {
        LinkError::ConfigParse(_) | LinkError::InvalidConfiguration(_) => EXIT_INVALID_CONFIG,
        LinkError::UnknownListIdentifier(_) => EXIT_UNKNOWN_LIST,
    }
}
