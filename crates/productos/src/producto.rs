use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_core::{DomainError, DomainResult, Entity, Nit, ProductCode, UserId};

use crate::precio::{Moneda, Precio};

const MIN_NOMBRE_LEN: usize = 2;

/// Entity: Producto.
///
/// Identified by its [`ProductCode`]; owned by the empresa whose NIT it
/// references. Holds at most one price per [`Moneda`].
#[derive(Debug, Clone)]
pub struct Producto {
    codigo: ProductCode,
    nombre: String,
    empresa_nit: Nit,
    caracteristicas: Option<String>,
    precios: BTreeMap<Moneda, Precio>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by_id: Option<UserId>,
}

impl Producto {
    pub fn new(
        codigo: ProductCode,
        nombre: impl Into<String>,
        empresa_nit: Nit,
        caracteristicas: Option<String>,
        created_by_id: Option<UserId>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            codigo,
            nombre: normalize_nombre(&nombre.into())?,
            empresa_nit,
            caracteristicas: caracteristicas.map(|c| c.trim().to_string()),
            precios: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            created_by_id,
        })
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn codigo(&self) -> &ProductCode {
        &self.codigo
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn empresa_nit(&self) -> &Nit {
        &self.empresa_nit
    }

    pub fn caracteristicas(&self) -> Option<&str> {
        self.caracteristicas.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn created_by_id(&self) -> Option<&UserId> {
        self.created_by_id.as_ref()
    }

    pub fn has_caracteristicas(&self) -> bool {
        self.caracteristicas.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Partial update. Validation runs before anything is committed.
    pub fn update_info(
        &mut self,
        nombre: Option<String>,
        caracteristicas: Option<String>,
        empresa_nit: Option<Nit>,
    ) -> DomainResult<()> {
        let nombre = match nombre {
            Some(n) => normalize_nombre(&n)?,
            None => self.nombre.clone(),
        };

        self.nombre = nombre;
        if let Some(caracteristicas) = caracteristicas {
            self.caracteristicas = Some(caracteristicas.trim().to_string());
        }
        if let Some(nit) = empresa_nit {
            self.empresa_nit = nit;
        }
        self.touch();
        Ok(())
    }

    pub fn change_empresa(&mut self, empresa_nit: Nit) {
        self.empresa_nit = empresa_nit;
        self.touch();
    }

    pub fn precio(&self, moneda: Moneda) -> Option<Precio> {
        self.precios.get(&moneda).copied()
    }

    /// Prices ordered by currency.
    pub fn precios(&self) -> impl Iterator<Item = (Moneda, Precio)> + '_ {
        self.precios.iter().map(|(m, p)| (*m, *p))
    }

    /// Insert or replace the price for `moneda`.
    pub fn set_precio(&mut self, moneda: Moneda, precio: Precio) {
        self.precios.insert(moneda, precio);
        self.touch();
    }

    /// Returns the removed price, if any.
    pub fn remove_precio(&mut self, moneda: Moneda) -> Option<Precio> {
        let removed = self.precios.remove(&moneda);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn snapshot(&self) -> ProductoSnapshot {
        ProductoSnapshot {
            codigo: self.codigo.to_string(),
            nombre: self.nombre.clone(),
            empresa_nit: self.empresa_nit.to_string(),
            caracteristicas: self.caracteristicas.clone(),
            precios: self.precios.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by_id: self.created_by_id.as_ref().map(|u| u.to_string()),
        }
    }

    pub fn from_snapshot(snapshot: ProductoSnapshot) -> DomainResult<Self> {
        let mut producto = Self::new(
            ProductCode::new(snapshot.codigo)?,
            snapshot.nombre,
            Nit::new(snapshot.empresa_nit)?,
            snapshot.caracteristicas,
            snapshot.created_by_id.map(UserId::new),
        )?;
        producto.precios = snapshot.precios;
        Ok(producto.with_timestamps(snapshot.created_at, snapshot.updated_at))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn normalize_nombre(nombre: &str) -> DomainResult<String> {
    let trimmed = nombre.trim();
    if trimmed.chars().count() < MIN_NOMBRE_LEN {
        return Err(DomainError::validation(format!(
            "producto nombre must have at least {MIN_NOMBRE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

impl Entity for Producto {
    type Id = ProductCode;

    fn id(&self) -> Self::Id {
        self.codigo.clone()
    }
}

impl PartialEq for Producto {
    fn eq(&self, other: &Self) -> bool {
        self.codigo == other.codigo
    }
}

impl Eq for Producto {}

impl core::hash::Hash for Producto {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.codigo.hash(state);
    }
}

impl core::fmt::Display for Producto {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Producto({} - {})", self.nombre, self.codigo)
    }
}

/// Flat, serializable view of a [`Producto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductoSnapshot {
    pub codigo: String,
    pub nombre: String,
    pub empresa_nit: String,
    pub caracteristicas: Option<String>,
    #[serde(default)]
    pub precios: BTreeMap<Moneda, Precio>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_id: Option<String>,
}
