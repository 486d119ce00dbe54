//! Command implementations.

mod family;
mod member;

pub use family::{add_relative, clear_family, execute_family, link_members, rerun_inference};
pub use member::{add_member, execute_member, remove_member};
