// src/dependencies/mod.rs

//! Pack dependency declarations
//!
//! A pack's `pack.yaml` lists its dependencies as plain strings:
//! - `aws` - a pack by name, any version
//! - `aws=v1.2.0` - a pack pinned to a version tag
//! - `https://github.com/StackStorm-Exchange/stackstorm-aws.git=v1.2.0` - a
//!   git source locator, optionally pinned
//!
//! # Example
//!
//! ```ignore
//! use packdeps::config::SpecSyntax;
//! use packdeps::dependencies::DependencySpec;
//!
//! let syntax = SpecSyntax::default();
//! let dep = DependencySpec::parse("https://example.com/org/stackstorm-aws.git=v1.2.0", &syntax);
//! assert_eq!(dep.pack_name(), "stackstorm-aws");
//! assert_eq!(dep.unprefixed_name(&syntax), Some("aws"));
//! assert_eq!(dep.version(), Some("v1.2.0"));
//! ```

mod parse;

pub use parse::DependencySpec;
pub(crate) use parse::{bare_pack_name, strip_namespace_prefix};
