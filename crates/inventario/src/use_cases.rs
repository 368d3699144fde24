use serde::{Deserialize, Serialize};

use nexus_core::{
    DEFAULT_PAGE_LIMIT, DomainError, DomainResult, InventarioId, Nit, Page, ProductCode, Quantity,
};
use nexus_empresas::EmpresaRepository;
use nexus_productos::ProductoRepository;

use crate::inventario::{DEFAULT_LOW_STOCK_THRESHOLD, Inventario};
use crate::repository::InventarioRepository;

const ENTITY: &str = "inventario";

/// Input: set the absolute stock of a pair, creating the record if needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrUpdateInventario {
    pub empresa_nit: String,
    pub producto_codigo: String,
    pub cantidad: i64,
}

/// Pagination applies only when no empresa filter is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInventario {
    #[serde(default)]
    pub empresa_nit: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Input for Add/RemoveStock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub inventario_id: InventarioId,
    pub cantidad: i64,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLowStockItems {
    #[serde(default)]
    pub threshold: Option<i64>,
}

fn fetch<R: InventarioRepository>(repository: &R, id: InventarioId) -> DomainResult<Inventario> {
    repository
        .find_by_id(id)
        .ok_or_else(|| DomainError::not_found(ENTITY, id.to_string()))
}

pub struct CreateOrUpdateInventarioUseCase<I, E, P> {
    inventarios: I,
    empresas: E,
    productos: P,
}

impl<I, E, P> CreateOrUpdateInventarioUseCase<I, E, P>
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

    /// Upsert with overwrite: an existing pair gets exactly `cantidad`.
    pub fn execute(&self, input: CreateOrUpdateInventario) -> DomainResult<Inventario> {
        let empresa_nit = Nit::new(input.empresa_nit)?;
        let producto_codigo = ProductCode::new(input.producto_codigo)?;
        let cantidad = Quantity::new(input.cantidad)?;

        if !self.empresas.exists(&empresa_nit) {
            return Err(DomainError::not_found("empresa", empresa_nit.as_str()));
        }
        if !self.productos.exists(&producto_codigo) {
            return Err(DomainError::not_found("producto", producto_codigo.as_str()));
        }

        let inventario = match self
            .inventarios
            .find_by_empresa_and_producto(&empresa_nit, &producto_codigo)
        {
            Some(mut existing) => {
                existing.update_stock(cantidad);
                existing
            }
            None => Inventario::new(empresa_nit, producto_codigo, cantidad),
        };

        self.inventarios.save(inventario)
    }
}

pub struct GetInventarioUseCase<R> {
    repository: R,
    default_limit: usize,
}

impl<R: InventarioRepository> GetInventarioUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            default_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn execute(&self, input: GetInventario) -> DomainResult<Vec<Inventario>> {
        if let Some(nit) = input.empresa_nit.filter(|n| !n.is_empty()) {
            return Ok(self.repository.find_by_empresa(&Nit::new(nit)?));
        }

        let page = Page::from_options(input.limit, input.offset, self.default_limit);
        Ok(self.repository.find_all(page))
    }
}

pub struct AddStockUseCase<R> {
    repository: R,
}

impl<R: InventarioRepository> AddStockUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, input: StockMovement) -> DomainResult<Inventario> {
        let cantidad = Quantity::new(input.cantidad)?;
        let mut inventario = fetch(&self.repository, input.inventario_id)?;
        inventario.add_stock(cantidad)?;
        self.repository.save(inventario)
    }
}

pub struct RemoveStockUseCase<R> {
    repository: R,
}

impl<R: InventarioRepository> RemoveStockUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// `InsufficientStock` propagates unchanged and nothing is saved.
    pub fn execute(&self, input: StockMovement) -> DomainResult<Inventario> {
        let cantidad = Quantity::new(input.cantidad)?;
        let mut inventario = fetch(&self.repository, input.inventario_id)?;
        inventario.remove_stock(cantidad)?;
        self.repository.save(inventario)
    }
}

pub struct DeleteInventarioUseCase<R> {
    repository: R,
}

impl<R: InventarioRepository> DeleteInventarioUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, id: InventarioId) -> DomainResult<bool> {
        fetch(&self.repository, id)?;
        self.repository.delete(id)
    }
}

pub struct GetLowStockItemsUseCase<R> {
    repository: R,
    default_threshold: i64,
}

impl<R: InventarioRepository> GetLowStockItemsUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            default_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_default_threshold(mut self, threshold: i64) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub fn execute(&self, input: GetLowStockItems) -> DomainResult<Vec<Inventario>> {
        let threshold = input.threshold.unwrap_or(self.default_threshold);
        Ok(self.repository.find_low_stock(threshold))
    }
}
