//! Persistence contract for empresas (implemented by the storage collaborator).

use std::sync::Arc;

use nexus_core::{DomainResult, Nit, Page};

use crate::empresa::Empresa;

/// Empresa repository.
///
/// Synchronous; one call is one logical read or write, with no implicit
/// caching. The domain layer makes no atomicity guarantee across calls: a
/// `exists` followed by a `create` is not atomic, which is why `create` itself
/// must enforce uniqueness of the NIT at the storage boundary.
pub trait EmpresaRepository: Send + Sync {
    /// Upsert by NIT: insert when absent, replace when present.
    fn save(&self, empresa: Empresa) -> DomainResult<Empresa>;

    /// Insert only when the NIT is absent; `Duplicate` otherwise.
    fn create(&self, empresa: Empresa) -> DomainResult<Empresa>;

    fn find_by_nit(&self, nit: &Nit) -> Option<Empresa>;

    fn find_all(&self, page: Page) -> Vec<Empresa>;

    /// Case-insensitive substring match on `nombre`.
    fn search_by_nombre(&self, nombre: &str) -> Vec<Empresa>;

    /// Returns whether a record was removed.
    fn delete(&self, nit: &Nit) -> DomainResult<bool>;

    fn exists(&self, nit: &Nit) -> bool;

    fn count(&self) -> usize;
}

impl<R> EmpresaRepository for &R
where
    R: EmpresaRepository + ?Sized,
{
    fn save(&self, empresa: Empresa) -> DomainResult<Empresa> {
        (**self).save(empresa)
    }

    fn create(&self, empresa: Empresa) -> DomainResult<Empresa> {
        (**self).create(empresa)
    }

    fn find_by_nit(&self, nit: &Nit) -> Option<Empresa> {
        (**self).find_by_nit(nit)
    }

    fn find_all(&self, page: Page) -> Vec<Empresa> {
        (**self).find_all(page)
    }

    fn search_by_nombre(&self, nombre: &str) -> Vec<Empresa> {
        (**self).search_by_nombre(nombre)
    }

    fn delete(&self, nit: &Nit) -> DomainResult<bool> {
        (**self).delete(nit)
    }

    fn exists(&self, nit: &Nit) -> bool {
        (**self).exists(nit)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}

impl<R> EmpresaRepository for Arc<R>
where
    R: EmpresaRepository + ?Sized,
{
    fn save(&self, empresa: Empresa) -> DomainResult<Empresa> {
        (**self).save(empresa)
    }

    fn create(&self, empresa: Empresa) -> DomainResult<Empresa> {
        (**self).create(empresa)
    }

    fn find_by_nit(&self, nit: &Nit) -> Option<Empresa> {
        (**self).find_by_nit(nit)
    }

    fn find_all(&self, page: Page) -> Vec<Empresa> {
        (**self).find_all(page)
    }

    fn search_by_nombre(&self, nombre: &str) -> Vec<Empresa> {
        (**self).search_by_nombre(nombre)
    }

    fn delete(&self, nit: &Nit) -> DomainResult<bool> {
        (**self).delete(nit)
    }

    fn exists(&self, nit: &Nit) -> bool {
        (**self).exists(nit)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}
