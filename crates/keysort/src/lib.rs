//! # keysort - sort records by multiple keys
//!
//! Sorts a list of records (string keyed maps of [value::Value]s) by any number of named fields, each in its own
//! direction. Later fields break ties left by earlier ones.
//!
//! ## Introduction for developers
//!
//! ### Records
//!
//! A record is a [value::Value::Object], or anything else implementing [sorter::AsRecord]. Field values are plain
//! [value::Value]s: integer widths are widened once when the value is built (`i8` → `i64`, `u16` → `u64`,
//! `f32` → `f64`), so comparing never has to look at the width a value originally had.
//!
//! ### Sort keys
//!
//! Keys are written as field names with an optional direction marker:
//!
//! | **specifier** | **field** | **direction** |
//! |---------------|-----------|---------------|
//! | `name`        | `name`    | ascending     |
//! | `+name`       | `name`    | ascending     |
//! | `-priority`   | `priority`| descending    |
//!
//! [sorter::by_keys] turns a list of specifiers into a [sorter::SortSpec] that uses the generic comparators from
//! [comparator]. Fields that need different comparison logic can use [sorter::by_key_comparators] with custom
//! [comparator::KeyComparator]s.
//!
//! ### Sorting
//!
//! see [sorter::SortSpec::sort]
//!
//! 1. the key values of every record are collected. Non-records and records missing a key are rejected.
//! 2. every key value is compared against the one of the first record, rejecting incomparable types early.
//! 3. record indices are sorted (stable) with the tie-break chain.
//! 4. the resulting permutation is applied to the records using swaps.
//!
//! Any failure leaves the records in their original order.
//!
//! ```
//! use keysort::{record, sorter::by_keys};
//!
//! let mut resources = vec![
//!     record! { "name" => "vnet-b", "region" => "westeurope" },
//!     record! { "name" => "vnet-a", "region" => "westeurope" },
//!     record! { "name" => "vnet-c", "region" => "eastus" },
//! ];
//!
//! by_keys(["region", "-name"]).unwrap().sort(&mut resources).unwrap();
//!
//! assert_eq!(resources[0], record! { "name" => "vnet-c", "region" => "eastus" });
//! assert_eq!(resources[1], record! { "name" => "vnet-b", "region" => "westeurope" });
//! ```
pub mod comparator;
pub mod sorter;
pub mod value;

#[doc(hidden)]
pub use indexmap;
