pub mod normalize;
pub mod tokenizer;
