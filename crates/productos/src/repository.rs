use std::sync::Arc;

use nexus_core::{DomainResult, Nit, Page, ProductCode};

use crate::producto::Producto;

/// Producto repository. Keys compare case-insensitively (see [`ProductCode`]).
pub trait ProductoRepository: Send + Sync {
    /// Upsert by código.
    fn save(&self, producto: Producto) -> DomainResult<Producto>;

    /// Insert only when the código is absent; `Duplicate` otherwise.
    fn create(&self, producto: Producto) -> DomainResult<Producto>;

    fn find_by_codigo(&self, codigo: &ProductCode) -> Option<Producto>;

    fn find_all(&self, page: Page) -> Vec<Producto>;

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Producto>;

    fn search_by_nombre(&self, nombre: &str) -> Vec<Producto>;

    fn delete(&self, codigo: &ProductCode) -> DomainResult<bool>;

    fn exists(&self, codigo: &ProductCode) -> bool;

    fn count(&self) -> usize;
}

macro_rules! forward_producto_repository {
    ($($wrapper:ty),+) => {$(
        impl<R> ProductoRepository for $wrapper
        where
            R: ProductoRepository + ?Sized,
        {
            fn save(&self, producto: Producto) -> DomainResult<Producto> {
                (**self).save(producto)
            }

            fn create(&self, producto: Producto) -> DomainResult<Producto> {
                (**self).create(producto)
            }

            fn find_by_codigo(&self, codigo: &ProductCode) -> Option<Producto> {
                (**self).find_by_codigo(codigo)
            }

            fn find_all(&self, page: Page) -> Vec<Producto> {
                (**self).find_all(page)
            }

            fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Producto> {
                (**self).find_by_empresa(empresa_nit)
            }

            fn search_by_nombre(&self, nombre: &str) -> Vec<Producto> {
                (**self).search_by_nombre(nombre)
            }

            fn delete(&self, codigo: &ProductCode) -> DomainResult<bool> {
                (**self).delete(codigo)
            }

            fn exists(&self, codigo: &ProductCode) -> bool {
                (**self).exists(codigo)
            }

            fn count(&self) -> usize {
                (**self).count()
            }
        }
    )+};
}

forward_producto_repository!(&R, Arc<R>);
