//! Domain-level constants.
//!
//! These constants define business rules and pagination defaults.

// =============================================================================
// Validation
// =============================================================================

/// Maximum identity number length, in characters.
///
/// Mirrored by the `length(max = 16)` rule on `UserDetails::identity_number`.
pub const MAX_IDENTITY_NUMBER_LENGTH: usize = 16;

// =============================================================================
// Pagination
// =============================================================================

/// Page returned when the caller does not ask for one (zero-based)
pub const DEFAULT_PAGE_NUMBER: u64 = 0;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u64 = 20;
