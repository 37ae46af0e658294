//! tfpr HCL - list patching for Terraform configuration
//!
//! This crate edits a single list assignment such as
//! `mysql_list = ["orders", "billing", ]` inside a `main.tf` file:
//! - locate the first assignment for a list name
//! - parse its items
//! - append a value unless it is already present
//! - render the list back and splice it into the original text
//!
//! Everything here is pure text in, text out. Reading and committing the
//! file is the caller's job.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod items;
pub mod locate;
pub mod patch;
pub mod render;

pub use error::{HclResult, PatchError};
pub use items::{append_unique, parse_items, Mutation};
pub use locate::{locate_list, validate_list_name, ListAssignment};
pub use patch::{patch, validate_value, PatchResult};
pub use render::{render_items, splice};
