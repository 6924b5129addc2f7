//! Navigation logic for gridfm.
//!
//! Listings flow through [`sort`], then [`filter`] (extension filter or
//! search), into an [`view::ItemView`]. [`grid`] lays the view out in
//! columns and pages; [`navigator`] moves the cursor over that layout.
//! [`clipboard`] stages paths across directory changes.

pub mod clipboard;
pub mod filter;
pub mod grid;
pub mod navigator;
pub mod selection;
pub mod sort;
pub mod view;
