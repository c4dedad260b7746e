//! Document storage and the forward/inverted index pair.

pub mod store;

pub use store::IndexStore;
