//! # Declarative file fixtures and golden-file snapshots
//!
//! `fixsnap` is for tests whose inputs and expectations live on disk:
//! - Bind the files of a case directory to the fields of a typed fixture with [`FixtureLoader`]
//! - Compare computed text with a recorded snapshot with [`assert_snapshot!`] or [`Snapshots`]
//! - Compare a computed value with an expected file with [`ContentVerifier`]
//!
//! Failures leave the actual value on disk and suggest the commands to inspect or accept it.
//!
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!
//! # Examples
//!
//! [`FixtureLoader`] for binding a case directory:
//! ```rust,no_run
//! use fixsnap::fixture::{FieldSpec, Fields, FixtureContent};
//!
//! #[derive(Default)]
//! struct Case {
//!     input: String,
//!     expected: std::path::PathBuf,
//! }
//!
//! impl FixtureContent for Case {
//!     fn fields() -> Fields<Self> {
//!         Fields::new()
//!             .bind("input", FieldSpec::new("input.txt"), |c: &mut Self, v: String| c.input = v)
//!             .bind(
//!                 "expected",
//!                 FieldSpec::new("expected.txt").inject_path(),
//!                 |c: &mut Self, v: std::path::PathBuf| c.expected = v,
//!             )
//!     }
//! }
//!
//! let case = fixsnap::FixtureLoader::<Case>::new()
//!     .with_deserializer(fixsnap::deserialize::text)
//!     .load_from_dir("tests/cases/empty")
//!     .unwrap();
//! println!("{}", case.input);
//! ```
//!
//! [`assert_snapshot!`] for comparing with `__snapshots__/<module>/<test>.snap`:
//! ```rust,no_run
//! let actual = "...";
//! fixsnap::assert_snapshot!(actual);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::print_stderr)]
#![warn(clippy::print_stdout)]

mod action;
mod error;

pub mod deserialize;
pub mod fixture;
pub mod path;
pub mod registry;
pub mod report;
pub mod snapshot;
pub mod utils;
pub mod verify;

pub use action::Action;
pub use action::DEFAULT_ACTION_ENV;
pub use error::BoxError;
pub use error::Error;
pub use error::Result;
pub use fixture::Fixture;
pub use fixture::FixtureLoader;
pub use snapshot::SnapshotKey;
pub use snapshot::Snapshots;
pub use verify::ContentVerifier;

pub use fixsnap_macros::debug;
#[doc(hidden)]
pub use fixsnap_macros::fn_path;
