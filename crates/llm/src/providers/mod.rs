//! Provider implementations of the inference boundary.

pub mod bedrock;

pub use bedrock::BedrockClient;
