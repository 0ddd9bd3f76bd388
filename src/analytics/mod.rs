pub mod frequency_tree;
pub mod tracker;
