//! Dashboard statistics across empresas, productos and inventario.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_core::{DomainResult, Nit, Page, ProductCode};
use nexus_empresas::EmpresaRepository;
use nexus_productos::{Moneda, Producto, ProductoRepository};

use crate::inventario::StockStatus;
use crate::repository::InventarioRepository;

/// Length of every ranked list in [`DashboardStats`].
const TOP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_empresas: usize,
    pub total_productos: usize,
    /// Sum of units across every inventario record.
    pub total_inventario: i64,
    /// Quantity times COP price, in minor units. Records without a COP price
    /// contribute nothing.
    pub valor_total_cop: u64,
    pub stock_status: BTreeMap<StockStatus, usize>,
    pub inventario_por_empresa: Vec<EmpresaStock>,
    /// Productos ranked by units held across all empresas.
    pub productos_top: Vec<ProductoStock>,
    /// Empresas ranked by number of productos they own.
    pub productos_por_empresa: Vec<EmpresaProductos>,
    pub empresas_recientes: Vec<EmpresaReciente>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaStock {
    pub nit: String,
    /// `None` when the empresa record no longer exists.
    pub nombre: Option<String>,
    pub total_productos: usize,
    pub total_cantidad: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductoStock {
    pub codigo: String,
    /// `None` when the producto record no longer exists.
    pub nombre: Option<String>,
    pub total_cantidad: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaProductos {
    pub nit: String,
    pub nombre: Option<String>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaReciente {
    pub nit: String,
    pub nombre: String,
    pub telefono: String,
    pub created_at: DateTime<Utc>,
}

pub struct GetDashboardStatsUseCase<I, E, P> {
    inventarios: I,
    empresas: E,
    productos: P,
}

impl<I, E, P> GetDashboardStatsUseCase<I, E, P>
where
    I: InventarioRepository,
    E: EmpresaRepository,
    P: ProductoRepository,
{
    pub fn new(inventarios: I, empresas: E, productos: P) -> Self {
        Self {
            inventarios,
            empresas,
            productos,
        }
    }

    pub fn execute(&self) -> DomainResult<DashboardStats> {
        let inventarios = self.inventarios.find_all(Page::all());
        let catalogo: HashMap<ProductCode, Producto> = self
            .productos
            .find_all(Page::all())
            .into_iter()
            .map(|p| (p.codigo().clone(), p))
            .collect();

        let mut stock_status: BTreeMap<StockStatus, usize> =
            StockStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut per_empresa: HashMap<Nit, (usize, i64)> = HashMap::new();
        let mut per_producto: HashMap<ProductCode, i64> = HashMap::new();
        let mut total_inventario = 0i64;
        let mut valor_total_cop = 0u64;

        for inventario in &inventarios {
            let cantidad = inventario.cantidad().value();
            total_inventario = total_inventario.saturating_add(cantidad);
            *stock_status.entry(inventario.stock_status()).or_default() += 1;

            let entry = per_empresa
                .entry(inventario.empresa_nit().clone())
                .or_default();
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(cantidad);

            let units = per_producto
                .entry(inventario.producto_codigo().clone())
                .or_default();
            *units = units.saturating_add(cantidad);

            let precio_cop = catalogo
                .get(inventario.producto_codigo())
                .and_then(|p| p.precio(Moneda::Cop));
            if let Some(precio) = precio_cop {
                let valor = precio.minor_units().saturating_mul(cantidad.unsigned_abs());
                valor_total_cop = valor_total_cop.saturating_add(valor);
            }
        }

        let mut ranked: Vec<(Nit, (usize, i64))> = per_empresa.into_iter().collect();
        ranked.sort_by(|(nit_a, (_, qty_a)), (nit_b, (_, qty_b))| {
            qty_b.cmp(qty_a).then_with(|| nit_a.cmp(nit_b))
        });
        let inventario_por_empresa = ranked
            .into_iter()
            .take(TOP)
            .map(|(nit, (total_productos, total_cantidad))| EmpresaStock {
                nombre: self.nombre_empresa(&nit),
                nit: nit.to_string(),
                total_productos,
                total_cantidad,
            })
            .collect();

        let mut productos_top: Vec<ProductoStock> = per_producto
            .into_iter()
            .map(|(codigo, total_cantidad)| ProductoStock {
                nombre: catalogo.get(&codigo).map(|p| p.nombre().to_string()),
                codigo: codigo.normalized(),
                total_cantidad,
            })
            .collect();
        productos_top.sort_by(|a, b| {
            b.total_cantidad
                .cmp(&a.total_cantidad)
                .then_with(|| a.codigo.cmp(&b.codigo))
        });
        productos_top.truncate(TOP);

        let mut owned: HashMap<&Nit, usize> = HashMap::new();
        for producto in catalogo.values() {
            *owned.entry(producto.empresa_nit()).or_default() += 1;
        }
        let mut owned: Vec<(&Nit, usize)> = owned.into_iter().collect();
        owned.sort_by(|(nit_a, a), (nit_b, b)| b.cmp(a).then_with(|| nit_a.cmp(nit_b)));
        let productos_por_empresa = owned
            .into_iter()
            .take(TOP)
            .map(|(nit, total)| EmpresaProductos {
                nit: nit.to_string(),
                nombre: self.nombre_empresa(nit),
                total,
            })
            .collect();

        let mut empresas = self.empresas.find_all(Page::all());
        empresas.sort_by_key(|e| (Reverse(e.created_at()), e.nit().clone()));
        let empresas_recientes = empresas
            .into_iter()
            .take(TOP)
            .map(|e| EmpresaReciente {
                nit: e.nit().to_string(),
                nombre: e.nombre().to_string(),
                telefono: e.telefono().to_string(),
                created_at: e.created_at(),
            })
            .collect();

        Ok(DashboardStats {
            total_empresas: self.empresas.count(),
            total_productos: self.productos.count(),
            total_inventario,
            valor_total_cop,
            stock_status,
            inventario_por_empresa,
            productos_top,
            productos_por_empresa,
            empresas_recientes,
        })
    }

    fn nombre_empresa(&self, nit: &Nit) -> Option<String> {
        self.empresas.find_by_nit(nit).map(|e| e.nombre().to_string())
    }
}
