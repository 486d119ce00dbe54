//! Kinship Inference
//!
//! Derives the transitive family graph after a member is saved with its
//! direct family links.
//!
//! # Overview
//!
//! When a member is saved with a spouse, children and parents, the engine
//! materializes what follows from them:
//! - **Step-relations**: a spouse's children become the member's children and
//!   the other way round
//! - **Grandparents**: the member's parents, and the spouse's parents, become
//!   grandparents of every child
//! - **Grandchildren**: children's children make the member a grandparent
//!
//! Each derived link is written in both directions with the proper
//! reciprocal label.
//!
//! # Invariants
//!
//! All writes go through [`ensure_link`], which creates an edge only when the
//! ordered pair is not linked yet (first writer wins), never links a member
//! to itself, and quietly skips members that have been deleted. Repeated
//! runs therefore never accumulate duplicate or contradictory edges.
//!
//! # Usage
//!
//! ```no_run
//! use kinship_domain::{Member, NewFamilyEdge, RelationLabel, Sex};
//! use kinship_inference::InferenceEngine;
//! use kinship_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("kinship.db")?;
//! let engine = InferenceEngine::default_config();
//!
//! let mut tx = store.transaction()?;
//! let father = Member::new("José", Some(Sex::Male));
//! let child = Member::new("Lucas", None);
//! tx.insert_member(&father)?;
//! tx.insert_member(&child)?;
//! tx.add_edge(NewFamilyEdge::linked(father.id, RelationLabel::Child, "Lucas", child.id))?;
//!
//! // Same transaction: a failure here must roll back the save as well
//! let report = engine.infer_family_relations(father.id, father.sex, &mut tx)?;
//! tx.commit()?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The engine can be configured via TOML:
//!
//! ```toml
//! [inference]
//! unspecified_sex_parent_label = "father"
//! strict_single_spouse = false
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod link;
mod report;

#[cfg(test)]
mod testing;

pub use config::InferenceConfig;
pub use engine::{FamilySnapshot, InferenceEngine};
pub use error::InferenceError;
pub use link::{ensure_link, LinkOutcome};
pub use report::{InferenceReport, Rule};
