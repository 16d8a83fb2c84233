// SPDX-License-Identifier: MPL-2.0

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! An in-memory ordered set.
//!
//! [`OrderedSet`] stores unique, totally ordered values in an unbalanced
//! binary search tree and supports membership tests, insertion, removal,
//! minimum and maximum retrieval, and in-order successor lookup.
//!
//! The set is a plain single-threaded structure. Callers that share one
//! instance between threads must serialize access themselves, for example by
//! wrapping it in a `Mutex`.

pub mod set;

pub use set::{OrderedSet, OrderedSetError};
