use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_core::{DomainError, DomainResult, Entity, Nit, Phone, UserId};

const MIN_NOMBRE_LEN: usize = 3;
const MIN_DIRECCION_LEN: usize = 5;

/// Entity: Empresa (company / tenant).
///
/// Identity is the NIT, immutable once set. Every constructor and mutator runs
/// the full validation before committing, so an invalid `Empresa` is never
/// observable.
#[derive(Debug, Clone)]
pub struct Empresa {
    nit: Nit,
    nombre: String,
    direccion: String,
    telefono: Phone,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by_id: Option<UserId>,
}

impl Empresa {
    pub fn new(
        nit: Nit,
        nombre: impl Into<String>,
        direccion: impl Into<String>,
        telefono: Phone,
        created_by_id: Option<UserId>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            nit,
            nombre: normalize_nombre(&nombre.into())?,
            direccion: normalize_direccion(&direccion.into())?,
            telefono,
            created_at: now,
            updated_at: now,
            created_by_id,
        })
    }

    /// Override the timestamps (rehydration from storage).
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn nit(&self) -> &Nit {
        &self.nit
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn direccion(&self) -> &str {
        &self.direccion
    }

    pub fn telefono(&self) -> &Phone {
        &self.telefono
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

    /// Partial update: only supplied fields change, `updated_at` always moves.
    pub fn update_info(
        &mut self,
        nombre: Option<String>,
        direccion: Option<String>,
        telefono: Option<Phone>,
    ) -> DomainResult<()> {
        let nombre = match nombre {
            Some(n) => normalize_nombre(&n)?,
            None => self.nombre.clone(),
        };
        let direccion = match direccion {
            Some(d) => normalize_direccion(&d)?,
            None => self.direccion.clone(),
        };

        self.nombre = nombre;
        self.direccion = direccion;
        if let Some(telefono) = telefono {
            self.telefono = telefono;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Deletion gate. Hook for dependency checks; currently always allowed.
    pub fn can_be_deleted(&self) -> bool {
        true
    }

    pub fn snapshot(&self) -> EmpresaSnapshot {
        EmpresaSnapshot {
            nit: self.nit.to_string(),
            nombre: self.nombre.clone(),
            direccion: self.direccion.clone(),
            telefono: self.telefono.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by_id: self.created_by_id.as_ref().map(|u| u.to_string()),
        }
    }

    pub fn from_snapshot(snapshot: EmpresaSnapshot) -> DomainResult<Self> {
        let empresa = Self::new(
            Nit::new(snapshot.nit)?,
            snapshot.nombre,
            snapshot.direccion,
            Phone::new(snapshot.telefono)?,
            snapshot.created_by_id.map(UserId::new),
        )?;
        Ok(empresa.with_timestamps(snapshot.created_at, snapshot.updated_at))
    }
}

fn normalize_nombre(nombre: &str) -> DomainResult<String> {
    let trimmed = nombre.trim();
    if trimmed.chars().count() < MIN_NOMBRE_LEN {
        return Err(DomainError::validation(format!(
            "empresa nombre must have at least {MIN_NOMBRE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_direccion(direccion: &str) -> DomainResult<String> {
    let trimmed = direccion.trim();
    if trimmed.chars().count() < MIN_DIRECCION_LEN {
        return Err(DomainError::validation(format!(
            "direccion must have at least {MIN_DIRECCION_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

impl Entity for Empresa {
    type Id = Nit;

    fn id(&self) -> Self::Id {
        self.nit.clone()
    }
}

impl PartialEq for Empresa {
    fn eq(&self, other: &Self) -> bool {
        self.nit == other.nit
    }
}

impl Eq for Empresa {}

impl core::hash::Hash for Empresa {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.nit.hash(state);
    }
}

impl core::fmt::Display for Empresa {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Empresa({} - {})", self.nombre, self.nit)
    }
}

/// Flat, serializable view of an [`Empresa`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaSnapshot {
    pub nit: String,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_id: Option<String>,
}
