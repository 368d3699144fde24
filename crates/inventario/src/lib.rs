//! Inventario domain module: stock per (empresa, producto) pair.
//!
//! Stock changes come in two flavours: absolute (`CreateOrUpdateInventario`,
//! an upsert that overwrites) and relative (`AddStock` / `RemoveStock`, by
//! surrogate id).

pub mod inventario;
pub mod repository;
pub mod stats;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use inventario::{DEFAULT_LOW_STOCK_THRESHOLD, Inventario, InventarioSnapshot, StockStatus};
pub use repository::InventarioRepository;
pub use stats::{
    DashboardStats, EmpresaProductos, EmpresaReciente, EmpresaStock, GetDashboardStatsUseCase,
    ProductoStock,
};
pub use use_cases::{
    AddStockUseCase, CreateOrUpdateInventario, CreateOrUpdateInventarioUseCase,
    DeleteInventarioUseCase, GetInventario, GetInventarioUseCase, GetLowStockItems,
    GetLowStockItemsUseCase, RemoveStockUseCase, StockMovement,
};
