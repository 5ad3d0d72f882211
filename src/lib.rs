//! Facade over the `vc_bean` workspace.
//!
//! Re-exports the property-path engine as [`bean`] and the `#[derive(Bean)]`
//! macro at the crate root.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_bean as bean;

pub use vc_bean::derive::Bean;
