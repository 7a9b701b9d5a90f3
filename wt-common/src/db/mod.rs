//! Database initialization and the bin store

pub mod bins;
pub mod init;

pub use bins::BinStore;
pub use init::*;
