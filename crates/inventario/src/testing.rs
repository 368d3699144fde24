//! In-crate fakes shared by the unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use nexus_core::{DomainError, DomainResult, InventarioId, Nit, Page, Phone, ProductCode};
use nexus_empresas::{Empresa, EmpresaRepository};
use nexus_productos::{Producto, ProductoRepository};

use crate::inventario::Inventario;
use crate::repository::InventarioRepository;

#[derive(Default)]
pub(crate) struct FakeInventarios {
    rows: Mutex<BTreeMap<InventarioId, Inventario>>,
    next_id: AtomicU64,
    writes: AtomicUsize,
}

impl FakeInventarios {
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl InventarioRepository for FakeInventarios {
    fn save(&self, inventario: Inventario) -> DomainResult<Inventario> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let id = rows
            .values()
            .find(|existing| *existing == &inventario)
            .and_then(Inventario::id)
            .unwrap_or_else(|| InventarioId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1));
        let stored = inventario.with_id(id);
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: InventarioId) -> Option<Inventario> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn find_by_empresa_and_producto(
        &self,
        empresa_nit: &Nit,
        producto_codigo: &ProductCode,
    ) -> Option<Inventario> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .find(|i| i.empresa_nit() == empresa_nit && i.producto_codigo() == producto_codigo)
            .cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Inventario> {
        page.slice(self.rows.lock().unwrap().values().cloned())
    }

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Inventario> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.empresa_nit() == empresa_nit)
            .cloned()
            .collect()
    }

    fn find_low_stock(&self, threshold: i64) -> Vec<Inventario> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.is_low_stock(threshold))
            .cloned()
            .collect()
    }

    fn delete(&self, id: InventarioId) -> DomainResult<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    fn exists(&self, empresa_nit: &Nit, producto_codigo: &ProductCode) -> bool {
        self.find_by_empresa_and_producto(empresa_nit, producto_codigo)
            .is_some()
    }

    fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

/// Read-only empresa lookup.
pub(crate) struct KnownEmpresas(Vec<Empresa>);

impl KnownEmpresas {
    pub(crate) fn of(nits: &[&str]) -> Self {
        Self(
            nits.iter()
                .map(|nit| {
                    Empresa::new(
                        Nit::new(*nit).unwrap(),
                        format!("Empresa {nit}"),
                        "Calle 1 #2-3",
                        Phone::new("3001234567").unwrap(),
                        None,
                    )
                    .unwrap()
                })
                .collect(),
        )
    }
}

impl EmpresaRepository for KnownEmpresas {
    fn save(&self, empresa: Empresa) -> DomainResult<Empresa> {
        Ok(empresa)
    }

    fn create(&self, empresa: Empresa) -> DomainResult<Empresa> {
        Err(DomainError::duplicate("empresa", empresa.nit().as_str()))
    }

    fn find_by_nit(&self, nit: &Nit) -> Option<Empresa> {
        self.0.iter().find(|e| e.nit() == nit).cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Empresa> {
        page.slice(self.0.iter().cloned())
    }

    fn search_by_nombre(&self, _nombre: &str) -> Vec<Empresa> {
        Vec::new()
    }

    fn delete(&self, _nit: &Nit) -> DomainResult<bool> {
        Ok(false)
    }

    fn exists(&self, nit: &Nit) -> bool {
        self.find_by_nit(nit).is_some()
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

/// Read-only producto lookup; every producto belongs to `900123456`.
pub(crate) struct KnownProductos(Vec<Producto>);

impl KnownProductos {
    pub(crate) fn of(codigos: &[&str]) -> Self {
        Self::with(
            codigos
                .iter()
                .map(|codigo| {
                    Producto::new(
                        ProductCode::new(*codigo).unwrap(),
                        format!("Producto {codigo}"),
                        Nit::new("900123456").unwrap(),
                        None,
                        None,
                    )
                    .unwrap()
                })
                .collect(),
        )
    }

    pub(crate) fn with(productos: Vec<Producto>) -> Self {
        Self(productos)
    }
}

impl ProductoRepository for KnownProductos {
    fn save(&self, producto: Producto) -> DomainResult<Producto> {
        Ok(producto)
    }

    fn create(&self, producto: Producto) -> DomainResult<Producto> {
        Err(DomainError::duplicate("producto", producto.codigo().as_str()))
    }

    fn find_by_codigo(&self, codigo: &ProductCode) -> Option<Producto> {
        self.0.iter().find(|p| p.codigo() == codigo).cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Producto> {
        page.slice(self.0.iter().cloned())
    }

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Producto> {
        self.0
            .iter()
            .filter(|p| p.empresa_nit() == empresa_nit)
            .cloned()
            .collect()
    }

    fn search_by_nombre(&self, _nombre: &str) -> Vec<Producto> {
        Vec::new()
    }

    fn delete(&self, _codigo: &ProductCode) -> DomainResult<bool> {
        Ok(false)
    }

    fn exists(&self, codigo: &ProductCode) -> bool {
        self.find_by_codigo(codigo).is_some()
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}
