pub mod assemble;
pub mod config;
pub mod discover;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
