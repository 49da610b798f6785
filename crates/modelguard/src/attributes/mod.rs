//! # Attribute System
//!
//! Attribute names and values as seen by the guard.
//!
//! - **Values**: any JSON value ([`AttrValue`]), kept in an ordered map ([`Attributes`]).
//! - **Outcomes**: every set reports whether it was written or silently rejected
//!   ([`AssignOutcome`]).
//! - **Casing**: names are matched across naming conventions through their
//!   [`CasingVariants`].
//!
//! ## Naming Conventions
//!
//! | Convention | `created_at` | `createdAt` |
//! |------------|--------------|-------------|
//! | UPPER | `CREATED_AT` | `CREATEDAT` |
//! | lower | `created_at` | `createdat` |
//! | Pascal | `CreatedAt` | `CreatedAt` |
//! | camel | `createdAt` | `createdAt` |
//! | snake | `created_at` | `created_at` |
//!
//! Two names match when any of their variants are equal, so a declaration of
//! `created_at` also covers writes addressed as `createdAt` or `CreatedAt`.

mod casing;
mod value;

pub use casing::{casing_variants, is_protected, CasingVariants};
pub use value::{AssignOutcome, AttrValue, Attributes, Rejection};
