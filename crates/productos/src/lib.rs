//! Productos domain module.
//!
//! A producto belongs to exactly one empresa (by NIT reference) and carries
//! optional prices in several currencies.

pub mod precio;
pub mod producto;
pub mod repository;
pub mod use_cases;

pub use precio::{MAX_PRECIO_MINOR, Moneda, Precio};
pub use producto::{Producto, ProductoSnapshot};
pub use repository::ProductoRepository;
pub use use_cases::{
    ChangeProductoEmpresa, ChangeProductoEmpresaUseCase, CreateProducto, CreateProductoUseCase,
    DeleteProductoUseCase, GetProductoUseCase, ListProductos, ListProductosUseCase,
    SetProductoPrecio, SetProductoPrecioUseCase, UpdateProducto, UpdateProductoUseCase,
};
