// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the typed accessor.

pub mod accessor;

// Re-export commonly used types
pub use accessor::ConfigAccessor;
