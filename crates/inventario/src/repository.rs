use std::sync::Arc;

use nexus_core::{DomainResult, InventarioId, Nit, Page, ProductCode};

use crate::inventario::Inventario;

/// Inventario repository.
///
/// `save` upserts by the (empresa, producto) pair and assigns the surrogate id
/// the first time a pair is stored. The returned entity always carries an id.
pub trait InventarioRepository: Send + Sync {
    fn save(&self, inventario: Inventario) -> DomainResult<Inventario>;

    fn find_by_id(&self, id: InventarioId) -> Option<Inventario>;

    fn find_by_empresa_and_producto(
        &self,
        empresa_nit: &Nit,
        producto_codigo: &ProductCode,
    ) -> Option<Inventario>;

    fn find_all(&self, page: Page) -> Vec<Inventario>;

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Inventario>;

    /// Records with `cantidad < threshold`.
    fn find_low_stock(&self, threshold: i64) -> Vec<Inventario>;

    fn delete(&self, id: InventarioId) -> DomainResult<bool>;

    fn exists(&self, empresa_nit: &Nit, producto_codigo: &ProductCode) -> bool;

    fn count(&self) -> usize;
}

macro_rules! forward_inventario_repository {
    ($($wrapper:ty),+) => {$(
        impl<R> InventarioRepository for $wrapper
        where
            R: InventarioRepository + ?Sized,
        {
            fn save(&self, inventario: Inventario) -> DomainResult<Inventario> {
                (**self).save(inventario)
            }

            fn find_by_id(&self, id: InventarioId) -> Option<Inventario> {
                (**self).find_by_id(id)
            }

            fn find_by_empresa_and_producto(
                &self,
                empresa_nit: &Nit,
                producto_codigo: &ProductCode,
            ) -> Option<Inventario> {
                (**self).find_by_empresa_and_producto(empresa_nit, producto_codigo)
            }

            fn find_all(&self, page: Page) -> Vec<Inventario> {
                (**self).find_all(page)
            }

            fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Inventario> {
                (**self).find_by_empresa(empresa_nit)
            }

            fn find_low_stock(&self, threshold: i64) -> Vec<Inventario> {
                (**self).find_low_stock(threshold)
            }

            fn delete(&self, id: InventarioId) -> DomainResult<bool> {
                (**self).delete(id)
            }

            fn exists(&self, empresa_nit: &Nit, producto_codigo: &ProductCode) -> bool {
                (**self).exists(empresa_nit, producto_codigo)
            }

            fn count(&self) -> usize {
                (**self).count()
            }
        }
    )+};
}

forward_inventario_repository!(&R, Arc<R>);
