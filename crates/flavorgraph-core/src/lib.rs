//! Flavorgraph Core - Pairing graph types
//!
//! This crate provides the node, edge and result types shared by the
//! Flavorgraph search pipeline, plus the dataset loader and recipe model.

pub mod category;
pub mod dataset;
pub mod edge;
pub mod error;
pub mod graph;
pub mod limits;
pub mod node;
pub mod recipe;
pub mod result;

pub use category::Category;
pub use dataset::Dataset;
pub use edge::{Edge, Strength};
pub use error::{Error, Result};
pub use graph::PairingGraph;
pub use node::{Node, NodeId};
pub use recipe::{NewRecipe, Recipe, RecipeId};
pub use result::SearchResult;
