//! # AppHub Aggregator
//!
//! Composes many small per-application fragment files into the few artifacts a browser
//! loads: one merged JSON document, one script, one stylesheet and one template bundle.
//!
//! ## Pipeline
//!
//! ```text
//! Namespace
//!     │
//!     ├──> Dispatcher (root layout + suffix rule)
//!     │      └─> apps_root/<namespace>
//!     │
//!     ├──> Walker (depth-first, suffix filter, explicit order)
//!     │      └─> Fragments
//!     │
//!     └──> JSON merge | marker-wrapped concat
//!            └─> Artifact bytes
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use apphub_aggregator::{Aggregator, ArtifactKind, Namespace, RootLayout};
//!
//! fn main() -> Result<(), apphub_aggregator::AggregateError> {
//!     let aggregator = Aggregator::new(RootLayout::MultiTenant {
//!         apps_root: "./apps".into(),
//!     });
//!     let ns = Namespace::parse("tasks")?;
//!     let artifact = aggregator.aggregate(Some(&ns), ArtifactKind::Script)?;
//!
//!     println!("{} bytes of {}", artifact.body.len(), artifact.content_type());
//!     Ok(())
//! }
//! ```

mod dispatch;
mod error;
mod json;
mod key;
mod namespace;
mod rules;
mod text;
mod walker;

pub use dispatch::{Aggregator, Artifact, RootLayout};
pub use error::{AggregateError, FragmentError, Result};
pub use json::{aggregate_json, JsonAggregate};
pub use key::derive_key;
pub use namespace::Namespace;
pub use rules::{ArtifactKind, Composition, SuffixRule};
pub use text::{aggregate_text, BlockMarkers, TextAggregate};
pub use walker::{walk, Fragment, Walk, WalkOrder};
