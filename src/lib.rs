#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod token;

pub use builder::{BuildSummary, TokenBuildContext, TokenBuilder};
pub use config::TokenConfig;
pub use error::{TokenError, TokenResult};
pub use resolver::{FsLookup, ImageLookup, NameResolver, ResolverRules};
