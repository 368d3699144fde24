//! Empresas domain module (companies / tenants).
//!
//! Business rules for empresas implemented as deterministic domain logic
//! (no IO, no HTTP, no storage). Storage is reached only through
//! [`EmpresaRepository`].

pub mod empresa;
pub mod repository;
pub mod use_cases;

pub use empresa::{Empresa, EmpresaSnapshot};
pub use repository::EmpresaRepository;
pub use use_cases::{
    CreateEmpresa, CreateEmpresaUseCase, DeleteEmpresaUseCase, GetEmpresaUseCase, ListEmpresas,
    ListEmpresasUseCase, UpdateEmpresa, UpdateEmpresaUseCase,
};
