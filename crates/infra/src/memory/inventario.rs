use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::debug;

use nexus_core::{DomainResult, InventarioId, Nit, Page, ProductCode};
use nexus_inventario::{Inventario, InventarioRepository};

use super::recover;

type PairKey = (Nit, String);

fn pair_key(empresa_nit: &Nit, producto_codigo: &ProductCode) -> PairKey {
    (empresa_nit.clone(), producto_codigo.normalized())
}

#[derive(Debug, Default)]
struct Rows {
    by_id: BTreeMap<InventarioId, Inventario>,
    by_pair: HashMap<PairKey, InventarioId>,
    last_id: u64,
}

/// Inventario rows ordered by surrogate id, indexed by (empresa, producto).
#[derive(Debug, Default)]
pub struct InMemoryInventarioRepository {
    rows: RwLock<Rows>,
}

impl InMemoryInventarioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(&self, keep: impl Fn(&Inventario) -> bool) -> Vec<Inventario> {
        recover(self.rows.read())
            .by_id
            .values()
            .filter(|i| keep(i))
            .cloned()
            .collect()
    }
}

impl InventarioRepository for InMemoryInventarioRepository {
    /// The pair decides the row; an id carried by the caller is ignored.
    fn save(&self, inventario: Inventario) -> DomainResult<Inventario> {
        let mut rows = recover(self.rows.write());
        let key = pair_key(inventario.empresa_nit(), inventario.producto_codigo());

        let id = match rows.by_pair.get(&key).copied() {
            Some(id) => id,
            None => {
                rows.last_id += 1;
                let id = InventarioId::new(rows.last_id);
                rows.by_pair.insert(key, id);
                id
            }
        };

        let stored = inventario.with_id(id);
        debug!(
            %id,
            empresa = %stored.empresa_nit(),
            producto = %stored.producto_codigo(),
            cantidad = stored.cantidad().value(),
            "saving inventario"
        );
        rows.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: InventarioId) -> Option<Inventario> {
        recover(self.rows.read()).by_id.get(&id).cloned()
    }

    fn find_by_empresa_and_producto(
        &self,
        empresa_nit: &Nit,
        producto_codigo: &ProductCode,
    ) -> Option<Inventario> {
        let rows = recover(self.rows.read());
        let id = rows.by_pair.get(&pair_key(empresa_nit, producto_codigo))?;
        rows.by_id.get(id).cloned()
    }

    fn find_all(&self, page: Page) -> Vec<Inventario> {
        page.slice(recover(self.rows.read()).by_id.values().cloned())
    }

    fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Inventario> {
        self.filtered(|i| i.empresa_nit() == empresa_nit)
    }

    fn find_low_stock(&self, threshold: i64) -> Vec<Inventario> {
        self.filtered(|i| i.is_low_stock(threshold))
    }

    fn delete(&self, id: InventarioId) -> DomainResult<bool> {
        let mut rows = recover(self.rows.write());
        let removed = match rows.by_id.remove(&id) {
            Some(inventario) => {
                rows.by_pair.remove(&pair_key(
                    inventario.empresa_nit(),
                    inventario.producto_codigo(),
                ));
                true
            }
            None => false,
        };
        debug!(%id, removed, "deleting inventario");
        Ok(removed)
    }

    fn exists(&self, empresa_nit: &Nit, producto_codigo: &ProductCode) -> bool {
        recover(self.rows.read())
            .by_pair
            .contains_key(&pair_key(empresa_nit, producto_codigo))
    }

    fn count(&self) -> usize {
        recover(self.rows.read()).by_id.len()
    }
}
