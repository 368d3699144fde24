//! Application-level operations on empresas.
//!
//! Each use-case bundles its repository and exposes a single `execute`.
//! They are cheap to build per call and hold no state besides the repository.

use serde::{Deserialize, Serialize};

use nexus_core::{DEFAULT_PAGE_LIMIT, DomainError, DomainResult, Nit, Page, Phone, UserId};

use crate::empresa::Empresa;
use crate::repository::EmpresaRepository;

const ENTITY: &str = "empresa";

/// Input: CreateEmpresa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmpresa {
    pub nit: String,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Input: ListEmpresas. `search` and plain listing are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmpresas {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default, alias = "filtro")]
    pub search: Option<String>,
}

/// Input: UpdateEmpresa. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmpresa {
    pub nit: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

pub struct CreateEmpresaUseCase<R> {
    repository: R,
}

impl<R: EmpresaRepository> CreateEmpresaUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, input: CreateEmpresa) -> DomainResult<Empresa> {
        let nit = Nit::new(input.nit)?;
        if self.repository.exists(&nit) {
            return Err(DomainError::duplicate(ENTITY, nit.as_str()));
        }

        let empresa = Empresa::new(
            nit,
            input.nombre,
            input.direccion,
            Phone::new(input.telefono)?,
            input.user_id.map(UserId::new),
        )?;

        self.repository.create(empresa)
    }
}

pub struct GetEmpresaUseCase<R> {
    repository: R,
}

impl<R: EmpresaRepository> GetEmpresaUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, nit: &str) -> DomainResult<Empresa> {
        let nit = Nit::new(nit)?;
        self.repository
            .find_by_nit(&nit)
            .ok_or_else(|| DomainError::not_found(ENTITY, nit.as_str()))
    }
}

pub struct ListEmpresasUseCase<R> {
    repository: R,
    default_limit: usize,
}

impl<R: EmpresaRepository> ListEmpresasUseCase<R> {
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

    pub fn execute(&self, input: ListEmpresas) -> DomainResult<Vec<Empresa>> {
        if let Some(search) = input.search.as_deref().filter(|s| !s.is_empty()) {
            return Ok(self.repository.search_by_nombre(search));
        }

        let page = Page::from_options(input.limit, input.offset, self.default_limit);
        Ok(self.repository.find_all(page))
    }
}

pub struct UpdateEmpresaUseCase<R> {
    repository: R,
}

impl<R: EmpresaRepository> UpdateEmpresaUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, input: UpdateEmpresa) -> DomainResult<Empresa> {
        let nit = Nit::new(input.nit)?;
        let mut empresa = self
            .repository
            .find_by_nit(&nit)
            .ok_or_else(|| DomainError::not_found(ENTITY, nit.as_str()))?;

        // An empty telefono counts as "not supplied".
        let telefono = input
            .telefono
            .filter(|t| !t.is_empty())
            .map(Phone::new)
            .transpose()?;
        empresa.update_info(input.nombre, input.direccion, telefono)?;

        self.repository.save(empresa)
    }
}

pub struct DeleteEmpresaUseCase<R> {
    repository: R,
}

impl<R: EmpresaRepository> DeleteEmpresaUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, nit: &str) -> DomainResult<bool> {
        let nit = Nit::new(nit)?;
        let empresa = self
            .repository
            .find_by_nit(&nit)
            .ok_or_else(|| DomainError::not_found(ENTITY, nit.as_str()))?;

        if !empresa.can_be_deleted() {
            return Err(DomainError::business_rule(
                "empresa cannot be deleted while it has dependencies",
            ));
        }

        self.repository.delete(&nit)
    }
}
