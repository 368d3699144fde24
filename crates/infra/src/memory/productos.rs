use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use nexus_core::{DomainError, DomainResult, Nit, Page, ProductCode};
use nexus_productos::{Producto, ProductoRepository};

use super::recover;

/// Productos keyed by normalized (upper-cased) código.
#[derive(Debug, Default)]
pub struct InMemoryProductoRepository {
    rows: RwLock<BTreeMap<String, Producto>>,
}

impl InMemoryProductoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(&self, keep: impl Fn(&Producto) -> bool) -> Vec<Producto> {
        recover(self.rows.read())
            .values()
            .filter(|p| keep(p))
            .cloned()
            .collect()
    }
}

impl ProductoRepository for InMemoryProductoRepository {
    fn save(&self, producto: Producto) -> DomainResult<Producto> {
        let mut rows = recover(self.rows.write());
        debug!(codigo = %producto.codigo(), "saving producto");
        rows.insert(producto.codigo().normalized(), producto.clone());
        Ok(producto)
    }

    fn create(&self, producto: Producto) -> DomainResult<Producto> {
        let mut rows = recover(self.rows.write());
        let key = producto.codigo().normalized();
        if rows.contains_key(&key) {
            return Err(DomainError::duplicate("producto", producto.codigo().as_str()));
        }
        debug!(codigo = %producto.codigo(), empresa = %producto.empresa_nit(), "creating producto");
        rows.insert(key, producto.clone());
        Ok(producto)
    }

    fn find_by_codigo(&self, codigo: &ProductCode) -> Option<Producto> {
        recover(self.rows.read()).get(&codigo.normalized()).cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Producto> {
        page.slice(recover(self.rows.read()).values().cloned())
    }

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Producto> {
        self.filtered(|p| p.empresa_nit() == empresa_nit)
    }

    fn search_by_nombre(&self, nombre: &str) -> Vec<Producto> {
        let needle = nombre.to_lowercase();
        self.filtered(|p| p.nombre().to_lowercase().contains(&needle))
    }

    fn delete(&self, codigo: &ProductCode) -> DomainResult<bool> {
        let removed = recover(self.rows.write())
            .remove(&codigo.normalized())
            .is_some();
        debug!(%codigo, removed, "deleting producto");
        Ok(removed)
    }

    fn exists(&self, codigo: &ProductCode) -> bool {
        recover(self.rows.read()).contains_key(&codigo.normalized())
    }

    fn count(&self) -> usize {
        recover(self.rows.read()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(codigo: &str, nombre: &str, nit: &str) -> Producto {
        Producto::new(
            ProductCode::new(codigo).unwrap(),
            nombre,
            Nit::new(nit).unwrap(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn keys_ignore_case() {
        let repo = InMemoryProductoRepository::new();
        repo.create(producto("prod-001", "Laptop", "900123456")).unwrap();

        let code = ProductCode::new("PROD-001").unwrap();
        assert!(repo.exists(&code));
        assert_eq!(repo.find_by_codigo(&code).unwrap().codigo().as_str(), "prod-001");
        assert!(matches!(
            repo.create(producto("PROD-001", "Other", "900123456")),
            Err(DomainError::Duplicate { .. })
        ));
    }

    #[test]
    fn filters_by_empresa_and_name() {
        let repo = InMemoryProductoRepository::new();
        repo.save(producto("A-001", "Laptop Dell", "900000001")).unwrap();
        repo.save(producto("A-002", "Mouse", "900000001")).unwrap();
        repo.save(producto("B-001", "Laptop HP", "900000002")).unwrap();

        assert_eq!(repo.find_by_empresa(&Nit::new("900000001").unwrap()).len(), 2);
        assert_eq!(repo.search_by_nombre("laptop").len(), 2);
        assert_eq!(repo.find_all(Page::new(10, 2)).len(), 1);
    }

    #[test]
    fn delete_by_other_casing() {
        let repo = InMemoryProductoRepository::new();
        repo.save(producto("PROD-001", "Laptop", "900123456")).unwrap();
        assert!(repo.delete(&ProductCode::new("prod-001").unwrap()).unwrap());
        assert_eq!(repo.count(), 0);
    }
}
