//! In-memory repositories for tests, demos and the tool binary.
//!
//! Each store keeps its rows behind one `RwLock`, so every trait call is a
//! single critical section. `create` checks and inserts under the same write
//! guard, which makes it the authoritative uniqueness check.

mod empresas;
mod inventario;
mod productos;

use std::sync::{LockResult, PoisonError};

pub use empresas::InMemoryEmpresaRepository;
pub use inventario::InMemoryInventarioRepository;
pub use productos::InMemoryProductoRepository;

/// A panicked writer cannot leave a row half-updated (rows are replaced
/// whole), so poisoned guards are recovered rather than surfaced.
fn recover<G>(result: LockResult<G>) -> G {
    result.unwrap_or_else(PoisonError::into_inner)
}
