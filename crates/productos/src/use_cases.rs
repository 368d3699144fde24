use serde::{Deserialize, Serialize};

use nexus_core::{DEFAULT_PAGE_LIMIT, DomainError, DomainResult, Nit, Page, ProductCode, UserId};
use nexus_empresas::EmpresaRepository;

use crate::precio::{Moneda, Precio};
use crate::producto::Producto;
use crate::repository::ProductoRepository;

const ENTITY: &str = "producto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProducto {
    pub codigo: String,
    pub nombre: String,
    pub empresa_nit: String,
    #[serde(default)]
    pub caracteristicas: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Filters apply in order: `empresa_nit`, then `search`, then plain paging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProductos {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub empresa_nit: Option<String>,
    #[serde(default, alias = "filtro", alias = "nombre_filtro")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProducto {
    pub codigo: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub caracteristicas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeProductoEmpresa {
    pub codigo: String,
    pub empresa_nit: String,
}

/// `precio: None` removes the price for `moneda`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProductoPrecio {
    pub codigo: String,
    pub moneda: String,
    #[serde(default)]
    pub precio: Option<String>,
}

fn fetch<R: ProductoRepository>(repository: &R, codigo: &str) -> DomainResult<Producto> {
    let codigo = ProductCode::new(codigo)?;
    repository
        .find_by_codigo(&codigo)
        .ok_or_else(|| DomainError::not_found(ENTITY, codigo.as_str()))
}

fn require_empresa<E: EmpresaRepository>(empresas: &E, nit: &Nit) -> DomainResult<()> {
    if empresas.exists(nit) {
        Ok(())
    } else {
        Err(DomainError::not_found("empresa", nit.as_str()))
    }
}

pub struct CreateProductoUseCase<P, E> {
    productos: P,
    empresas: E,
}

impl<P: ProductoRepository, E: EmpresaRepository> CreateProductoUseCase<P, E> {
    pub fn new(productos: P, empresas: E) -> Self {
        Self {
            productos,
            empresas,
        }
    }

    /// Duplicate código is reported before a missing empresa.
    pub fn execute(&self, input: CreateProducto) -> DomainResult<Producto> {
        let codigo = ProductCode::new(input.codigo)?;
        if self.productos.exists(&codigo) {
            return Err(DomainError::duplicate(ENTITY, codigo.as_str()));
        }

        let empresa_nit = Nit::new(input.empresa_nit)?;
        require_empresa(&self.empresas, &empresa_nit)?;

        let producto = Producto::new(
            codigo,
            input.nombre,
            empresa_nit,
            input.caracteristicas,
            input.user_id.map(UserId::new),
        )?;
        self.productos.create(producto)
    }
}

pub struct GetProductoUseCase<R> {
    repository: R,
}

impl<R: ProductoRepository> GetProductoUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, codigo: &str) -> DomainResult<Producto> {
        fetch(&self.repository, codigo)
    }
}

pub struct ListProductosUseCase<R> {
    repository: R,
    default_limit: usize,
}

impl<R: ProductoRepository> ListProductosUseCase<R> {
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

    pub fn execute(&self, input: ListProductos) -> DomainResult<Vec<Producto>> {
        if let Some(nit) = input.empresa_nit.filter(|n| !n.is_empty()) {
            return Ok(self.repository.find_by_empresa(&Nit::new(nit)?));
        }
        if let Some(search) = input.search.filter(|s| !s.is_empty()) {
            return Ok(self.repository.search_by_nombre(&search));
        }

        let page = Page::from_options(input.limit, input.offset, self.default_limit);
        Ok(self.repository.find_all(page))
    }
}

/// Updates nombre and caracteristicas. Ownership changes go through
/// [`ChangeProductoEmpresaUseCase`], which checks the target empresa.
pub struct UpdateProductoUseCase<R> {
    repository: R,
}

impl<R: ProductoRepository> UpdateProductoUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, input: UpdateProducto) -> DomainResult<Producto> {
        let mut producto = fetch(&self.repository, &input.codigo)?;
        producto.update_info(input.nombre, input.caracteristicas, None)?;
        self.repository.save(producto)
    }
}

pub struct DeleteProductoUseCase<R> {
    repository: R,
}

impl<R: ProductoRepository> DeleteProductoUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, codigo: &str) -> DomainResult<bool> {
        let producto = fetch(&self.repository, codigo)?;
        self.repository.delete(producto.codigo())
    }
}

pub struct ChangeProductoEmpresaUseCase<P, E> {
    productos: P,
    empresas: E,
}

impl<P: ProductoRepository, E: EmpresaRepository> ChangeProductoEmpresaUseCase<P, E> {
    pub fn new(productos: P, empresas: E) -> Self {
        Self {
            productos,
            empresas,
        }
    }

    pub fn execute(&self, input: ChangeProductoEmpresa) -> DomainResult<Producto> {
        let mut producto = fetch(&self.productos, &input.codigo)?;
        let empresa_nit = Nit::new(input.empresa_nit)?;
        require_empresa(&self.empresas, &empresa_nit)?;

        producto.change_empresa(empresa_nit);
        self.productos.save(producto)
    }
}

pub struct SetProductoPrecioUseCase<R> {
    repository: R,
}

impl<R: ProductoRepository> SetProductoPrecioUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn execute(&self, input: SetProductoPrecio) -> DomainResult<Producto> {
        let moneda: Moneda = input.moneda.parse()?;
        let precio = input.precio.map(|p| p.parse::<Precio>()).transpose()?;

        let mut producto = fetch(&self.repository, &input.codigo)?;
        match precio {
            Some(precio) => producto.set_precio(moneda, precio),
            None => {
                producto.remove_precio(moneda);
            }
        }
        self.repository.save(producto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::Phone;
    use nexus_empresas::Empresa;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProductos {
        rows: Mutex<HashMap<ProductCode, Producto>>,
        writes: AtomicUsize,
    }

    impl FakeProductos {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl ProductoRepository for FakeProductos {
        fn save(&self, producto: Producto) -> DomainResult<Producto> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.rows
                .lock()
                .unwrap()
                .insert(producto.codigo().clone(), producto.clone());
            Ok(producto)
        }

        fn create(&self, producto: Producto) -> DomainResult<Producto> {
            if self.exists(producto.codigo()) {
                return Err(DomainError::duplicate(ENTITY, producto.codigo().as_str()));
            }
            self.save(producto)
        }

        fn find_by_codigo(&self, codigo: &ProductCode) -> Option<Producto> {
            self.rows.lock().unwrap().get(codigo).cloned()
        }

        fn find_all(&self, page: Page) -> Vec<Producto> {
            let mut all: Vec<_> = self.rows.lock().unwrap().values().cloned().collect();
            all.sort_by_key(|p| p.codigo().normalized());
            page.slice(all)
        }

        fn find_by_empresa(&self, empresa_nit: &Nit) -> Vec<Producto> {
            self.rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.empresa_nit() == empresa_nit)
                .cloned()
                .collect()
        }

        fn search_by_nombre(&self, nombre: &str) -> Vec<Producto> {
            let needle = nombre.to_lowercase();
            self.rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.nombre().to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }

        fn delete(&self, codigo: &ProductCode) -> DomainResult<bool> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().unwrap().remove(codigo).is_some())
        }

        fn exists(&self, codigo: &ProductCode) -> bool {
            self.rows.lock().unwrap().contains_key(codigo)
        }

        fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    /// Only `exists` matters to these use-cases.
    #[derive(Default)]
    struct KnownEmpresas(Vec<Nit>);

    impl KnownEmpresas {
        fn of(nits: &[&str]) -> Self {
            Self(nits.iter().map(|n| Nit::new(*n).unwrap()).collect())
        }
    }

    impl EmpresaRepository for KnownEmpresas {
        fn save(&self, empresa: Empresa) -> DomainResult<Empresa> {
            Ok(empresa)
        }

        fn create(&self, empresa: Empresa) -> DomainResult<Empresa> {
            Ok(empresa)
        }

        fn find_by_nit(&self, nit: &Nit) -> Option<Empresa> {
            self.exists(nit).then(|| {
                Empresa::new(
                    nit.clone(),
                    "Known",
                    "Calle 1 #2-3",
                    Phone::new("3001234567").unwrap(),
                    None,
                )
                .unwrap()
            })
        }

        fn find_all(&self, _page: Page) -> Vec<Empresa> {
            Vec::new()
        }

        fn search_by_nombre(&self, _nombre: &str) -> Vec<Empresa> {
            Vec::new()
        }

        fn delete(&self, _nit: &Nit) -> DomainResult<bool> {
            Ok(false)
        }

        fn exists(&self, nit: &Nit) -> bool {
            self.0.contains(nit)
        }

        fn count(&self) -> usize {
            self.0.len()
        }
    }

    fn create_input(codigo: &str, empresa_nit: &str) -> CreateProducto {
        CreateProducto {
            codigo: codigo.to_string(),
            nombre: "Laptop Dell".to_string(),
            empresa_nit: empresa_nit.to_string(),
            caracteristicas: None,
            user_id: Some("u1".to_string()),
        }
    }

    fn seeded() -> FakeProductos {
        let repo = FakeProductos::default();
        let empresas = KnownEmpresas::of(&["900123456", "800999888"]);
        let create = CreateProductoUseCase::new(&repo, &empresas);
        create.execute(create_input("PROD-001", "900123456")).unwrap();
        create
            .execute(CreateProducto {
                nombre: "Mouse inalambrico".to_string(),
                ..create_input("PROD-002", "900123456")
            })
            .unwrap();
        create
            .execute(CreateProducto {
                nombre: "Laptop Lenovo".to_string(),
                ..create_input("PROD-003", "800999888")
            })
            .unwrap();
        repo
    }

    #[test]
    fn create_requires_existing_empresa() {
        let repo = FakeProductos::default();
        let empresas = KnownEmpresas::default();
        let err = CreateProductoUseCase::new(&repo, &empresas)
            .execute(create_input("PROD-001", "900123456"))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("empresa", "900123456"));
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn duplicate_codigo_wins_over_missing_empresa() {
        let repo = seeded();
        let empresas = KnownEmpresas::default();
        let err = CreateProductoUseCase::new(&repo, &empresas)
            .execute(create_input("prod-001", "111111111"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate { .. }));
    }

    #[test]
    fn list_filter_priority() {
        let repo = seeded();
        let use_case = ListProductosUseCase::new(&repo);

        let by_empresa = use_case
            .execute(ListProductos {
                empresa_nit: Some("900123456".to_string()),
                search: Some("Lenovo".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_empresa.len(), 2);

        let by_search = use_case
            .execute(ListProductos {
                search: Some("laptop".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_search.len(), 2);

        let paged = use_case
            .execute(ListProductos {
                limit: Some(2),
                offset: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].codigo().as_str(), "PROD-003");
    }

    #[test]
    fn get_is_case_insensitive() {
        let repo = seeded();
        let found = GetProductoUseCase::new(&repo).execute("prod-002").unwrap();
        assert_eq!(found.nombre(), "Mouse inalambrico");
    }

    #[test]
    fn malformed_codigo_is_validation_not_missing() {
        let repo = seeded();
        let err = GetProductoUseCase::new(&repo).execute("x!").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_keeps_empresa() {
        let repo = seeded();
        let updated = UpdateProductoUseCase::new(&repo)
            .execute(UpdateProducto {
                codigo: "PROD-001".to_string(),
                nombre: Some("Laptop Dell XPS".to_string()),
                caracteristicas: Some("16GB".to_string()),
            })
            .unwrap();
        assert_eq!(updated.nombre(), "Laptop Dell XPS");
        assert_eq!(updated.empresa_nit().as_str(), "900123456");
        assert!(updated.has_caracteristicas());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let repo = seeded();
        let use_case = DeleteProductoUseCase::new(&repo);
        assert!(use_case.execute("PROD-002").unwrap());
        assert!(matches!(
            use_case.execute("PROD-002"),
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn change_empresa_checks_target() {
        let repo = seeded();
        let empresas = KnownEmpresas::of(&["900123456", "800999888"]);
        let use_case = ChangeProductoEmpresaUseCase::new(&repo, &empresas);

        let err = use_case
            .execute(ChangeProductoEmpresa {
                codigo: "PROD-001".to_string(),
                empresa_nit: "700000000".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("empresa", "700000000"));

        let moved = use_case
            .execute(ChangeProductoEmpresa {
                codigo: "PROD-001".to_string(),
                empresa_nit: "800999888".to_string(),
            })
            .unwrap();
        assert_eq!(moved.empresa_nit().as_str(), "800999888");
    }

    #[test]
    fn set_and_clear_precio() {
        let repo = seeded();
        let use_case = SetProductoPrecioUseCase::new(&repo);

        let priced = use_case
            .execute(SetProductoPrecio {
                codigo: "PROD-001".to_string(),
                moneda: "cop".to_string(),
                precio: Some("3500000".to_string()),
            })
            .unwrap();
        assert_eq!(
            priced.precio(Moneda::Cop).map(Precio::minor_units),
            Some(350_000_000)
        );

        let cleared = use_case
            .execute(SetProductoPrecio {
                codigo: "PROD-001".to_string(),
                moneda: "COP".to_string(),
                precio: None,
            })
            .unwrap();
        assert!(cleared.precio(Moneda::Cop).is_none());
    }

    #[test]
    fn bad_moneda_fails_before_lookup() {
        let repo = FakeProductos::default();
        let err = SetProductoPrecioUseCase::new(&repo)
            .execute(SetProductoPrecio {
                codigo: "PROD-404".to_string(),
                moneda: "BTC".to_string(),
                precio: Some("1".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
