//! Flow graph infrastructure

pub mod block_builder;
pub mod block_connector;
pub mod renumber;
pub mod serializer;
pub mod statement_classifier;

pub use block_builder::{BlockBuilder, CollectedBlocks};
pub use block_connector::BlockConnector;
pub use renumber::BlockRenumberer;
pub use serializer::CfgSerializer;
pub use statement_classifier::StatementClassifier;
