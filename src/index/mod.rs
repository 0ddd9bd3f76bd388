pub mod posting;
pub mod trie;
pub mod structured;
