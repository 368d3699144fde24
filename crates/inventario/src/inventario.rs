use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_core::{DomainError, DomainResult, Entity, InventarioId, Nit, ProductCode, Quantity};

/// Quantity below which a record counts as low stock (strict `<`).
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

const MEDIUM_STOCK_THRESHOLD: i64 = 50;

/// Classification derived from the quantity on every read. Never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Agotado,
    Bajo,
    Medio,
    Alto,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::Agotado,
        StockStatus::Bajo,
        StockStatus::Medio,
        StockStatus::Alto,
    ];

    pub fn for_quantity(cantidad: Quantity) -> Self {
        match cantidad.value() {
            0 => StockStatus::Agotado,
            n if n < DEFAULT_LOW_STOCK_THRESHOLD => StockStatus::Bajo,
            n if n < MEDIUM_STOCK_THRESHOLD => StockStatus::Medio,
            _ => StockStatus::Alto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Agotado => "AGOTADO",
            StockStatus::Bajo => "BAJO",
            StockStatus::Medio => "MEDIO",
            StockStatus::Alto => "ALTO",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity: Inventario.
///
/// Stock of one producto held by one empresa. The natural identity is the
/// (empresa, producto) pair; `id` is the surrogate assigned by storage and is
/// `None` until the record is first persisted.
#[derive(Debug, Clone)]
pub struct Inventario {
    id: Option<InventarioId>,
    empresa_nit: Nit,
    producto_codigo: ProductCode,
    cantidad: Quantity,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Inventario {
    pub fn new(empresa_nit: Nit, producto_codigo: ProductCode, cantidad: Quantity) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            empresa_nit,
            producto_codigo,
            cantidad,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: InventarioId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn id(&self) -> Option<InventarioId> {
        self.id
    }

    pub fn empresa_nit(&self) -> &Nit {
        &self.empresa_nit
    }

    pub fn producto_codigo(&self) -> &ProductCode {
        &self.producto_codigo
    }

    pub fn cantidad(&self) -> Quantity {
        self.cantidad
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn add_stock(&mut self, cantidad: Quantity) -> DomainResult<()> {
        self.cantidad = self.cantidad.add(cantidad)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Fails with `InsufficientStock` and leaves the record untouched when
    /// `cantidad` exceeds what is available.
    pub fn remove_stock(&mut self, cantidad: Quantity) -> DomainResult<()> {
        if !self.cantidad.is_sufficient(cantidad) {
            return Err(DomainError::insufficient_stock(
                self.cantidad.value(),
                cantidad.value(),
            ));
        }
        self.cantidad = self.cantidad.subtract(cantidad)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Absolute overwrite.
    pub fn update_stock(&mut self, cantidad: Quantity) {
        self.cantidad = cantidad;
        self.updated_at = Utc::now();
    }

    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.cantidad.value() < threshold
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.cantidad.is_zero()
    }

    pub fn can_fulfill_order(&self, required: Quantity) -> bool {
        self.cantidad.is_sufficient(required)
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.cantidad)
    }

    pub fn snapshot(&self) -> InventarioSnapshot {
        InventarioSnapshot {
            id: self.id,
            empresa_nit: self.empresa_nit.to_string(),
            producto_codigo: self.producto_codigo.to_string(),
            cantidad: self.cantidad.value(),
            stock_status: self.stock_status(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// `stock_status` in the snapshot is ignored and recomputed.
    pub fn from_snapshot(snapshot: InventarioSnapshot) -> DomainResult<Self> {
        let mut inventario = Self::new(
            Nit::new(snapshot.empresa_nit)?,
            ProductCode::new(snapshot.producto_codigo)?,
            Quantity::new(snapshot.cantidad)?,
        )
        .with_timestamps(snapshot.created_at, snapshot.updated_at);
        inventario.id = snapshot.id;
        Ok(inventario)
    }
}

impl Entity for Inventario {
    type Id = (Nit, ProductCode);

    fn id(&self) -> Self::Id {
        (self.empresa_nit.clone(), self.producto_codigo.clone())
    }
}

impl PartialEq for Inventario {
    fn eq(&self, other: &Self) -> bool {
        self.empresa_nit == other.empresa_nit && self.producto_codigo == other.producto_codigo
    }
}

impl Eq for Inventario {}

impl core::hash::Hash for Inventario {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.empresa_nit.hash(state);
        self.producto_codigo.hash(state);
    }
}

impl core::fmt::Display for Inventario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Inventario({} - {}: {})",
            self.empresa_nit, self.producto_codigo, self.cantidad
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventarioSnapshot {
    pub id: Option<InventarioId>,
    pub empresa_nit: String,
    pub producto_codigo: String,
    pub cantidad: i64,
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
