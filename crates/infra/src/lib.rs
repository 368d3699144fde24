//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod memory;


pub use config::NexusConfig;
pub use memory::{
    InMemoryEmpresaRepository, InMemoryInventarioRepository, InMemoryProductoRepository,
};
