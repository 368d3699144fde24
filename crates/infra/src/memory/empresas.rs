use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use nexus_core::{DomainError, DomainResult, Nit, Page};
use nexus_empresas::{Empresa, EmpresaRepository};

use super::recover;

/// Empresas ordered by NIT.
#[derive(Debug, Default)]
pub struct InMemoryEmpresaRepository {
    rows: RwLock<BTreeMap<Nit, Empresa>>,
}

impl InMemoryEmpresaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmpresaRepository for InMemoryEmpresaRepository {
    fn save(&self, empresa: Empresa) -> DomainResult<Empresa> {
        let mut rows = recover(self.rows.write());
        debug!(nit = %empresa.nit(), "saving empresa");
        rows.insert(empresa.nit().clone(), empresa.clone());
        Ok(empresa)
    }

    fn create(&self, empresa: Empresa) -> DomainResult<Empresa> {
        let mut rows = recover(self.rows.write());
        if rows.contains_key(empresa.nit()) {
            return Err(DomainError::duplicate("empresa", empresa.nit().as_str()));
        }
        debug!(nit = %empresa.nit(), "creating empresa");
        rows.insert(empresa.nit().clone(), empresa.clone());
        Ok(empresa)
    }

    fn find_by_nit(&self, nit: &Nit) -> Option<Empresa> {
        recover(self.rows.read()).get(nit).cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Empresa> {
        page.slice(recover(self.rows.read()).values().cloned())
    }

    fn search_by_nombre(&self, nombre: &str) -> Vec<Empresa> {
        let needle = nombre.to_lowercase();
        recover(self.rows.read())
            .values()
            .filter(|e| e.nombre().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn delete(&self, nit: &Nit) -> DomainResult<bool> {
        let removed = recover(self.rows.write()).remove(nit).is_some();
        debug!(%nit, removed, "deleting empresa");
        Ok(removed)
    }

    fn exists(&self, nit: &Nit) -> bool {
        recover(self.rows.read()).contains_key(nit)
    }

    fn count(&self) -> usize {
        recover(self.rows.read()).len()
    }
}
