//! Rendering modules mapping normalized records to HTML.
//!
//! Each renderer is a pure function from data to a [`html::Node`] tree;
//! nothing here performs I/O except [`article::DetailPage::load`], which
//! drives the detail-page state machine around a single fetch.
//!
//! # Submodules
//!
//! - [`html`]: the serializable node tree and its HTML serialization
//! - [`listing`]: card-style summaries for a page of search results
//! - [`article`]: the single-article detail view and its state machine
//! - [`page`]: wrapping a block in a complete HTML document

pub mod article;
pub mod html;
pub mod listing;
pub mod page;
