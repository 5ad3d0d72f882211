//! Dynamic, path-based property navigation over reflected values.
//!
//! Given a textual path such as `a.b[2].c[key]`, this crate reads, writes,
//! or checks the existence of a value inside a nested graph of records,
//! dictionaries, sequences and lazy suppliers, without the caller knowing
//! the concrete shape in advance.
//!
//! # Layers
//!
//! - [`Reflect`] and the [`info`]/[`ops`] modules: a small runtime reflection
//!   model. Records are usually implemented with [`derive::Bean`].
//! - [`registry`]: the [`Introspector`](registry::Introspector), a shared,
//!   thread-safe cache of per-type member descriptors.
//! - [`access`]: the property path grammar.
//! - [`bean`]: the navigator ([`BeanUtil`](bean::BeanUtil)), its presets,
//!   the visitor and the copy utility.
//!
//! # Example
//!
//! ```
//! use vc_bean::bean::BeanUtil;
//! use vc_bean::derive::Bean;
//! use vc_bean::registry::Introspector;
//!
//! #[derive(Bean, Default)]
//! #[bean(default)]
//! pub struct Child {
//!     pub number: i32,
//! }
//!
//! #[derive(Bean, Default)]
//! pub struct Parent {
//!     pub child: Option<Child>,
//! }
//!
//! let beans = BeanUtil::new(Introspector::new()).forced(true);
//! let mut parent = Parent::default();
//!
//! beans.set_property(&mut parent, "child.number", 43_i32).unwrap();
//! assert_eq!(parent.child.as_ref().map(|c| c.number), Some(43));
//! assert!(beans.has_property(&parent, "child.number"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `vc_bean`, which must also resolve inside this crate.
extern crate self as vc_bean;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;
mod utils;

pub mod access;
pub mod bean;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use vc_bean_derive as derive;
