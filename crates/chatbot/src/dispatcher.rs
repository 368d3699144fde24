//! Routes tool calls onto the domain use-cases.
//!
//! Arguments are decoded into the use-case command types, the caller's role
//! is checked for mutating tools, and every outcome is folded into a
//! [`ToolResponse`].

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use nexus_auth::{Principal, require_write};
use nexus_core::{Email, InventarioId, Nit, Page};
use nexus_empresas::{
    CreateEmpresa, CreateEmpresaUseCase, DeleteEmpresaUseCase, EmpresaRepository,
    GetEmpresaUseCase, ListEmpresas, ListEmpresasUseCase, UpdateEmpresa, UpdateEmpresaUseCase,
};
use nexus_infra::NexusConfig;
use nexus_inventario::{
    AddStockUseCase, CreateOrUpdateInventario, CreateOrUpdateInventarioUseCase,
    DeleteInventarioUseCase, GetDashboardStatsUseCase, GetInventario, GetInventarioUseCase,
    GetLowStockItems, GetLowStockItemsUseCase, Inventario, InventarioRepository,
    RemoveStockUseCase, StockMovement,
};
use nexus_productos::{
    ChangeProductoEmpresa, ChangeProductoEmpresaUseCase, CreateProducto, CreateProductoUseCase,
    DeleteProductoUseCase, GetProductoUseCase, ListProductos, ListProductosUseCase,
    ProductoRepository, SetProductoPrecio, SetProductoPrecioUseCase, UpdateProducto,
    UpdateProductoUseCase,
};

use crate::error::ToolError;
use crate::reports::{Mailer, ReportRenderer};
use crate::response::ToolResponse;

const REPORT_SUBJECT: &str = "Reporte de inventario";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSettings {
    /// Default `limit` for list tools.
    pub list_limit: usize,
    pub low_stock_threshold: i64,
}

impl ToolSettings {
    pub fn from_config(config: &NexusConfig) -> Self {
        Self {
            list_limit: config.tool_list_limit,
            low_stock_threshold: config.low_stock_threshold,
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&NexusConfig::default())
    }
}

#[derive(Debug, Deserialize)]
struct NitArgs {
    nit: String,
}

#[derive(Debug, Deserialize)]
struct CodigoArgs {
    codigo: String,
}

#[derive(Debug, Deserialize)]
struct InventarioIdArgs {
    inventario_id: InventarioId,
}

#[derive(Debug, Default, Deserialize)]
struct ReportArgs {
    #[serde(default)]
    empresa_nit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailReportArgs {
    email: String,
    #[serde(default)]
    empresa_nit: Option<String>,
}

pub struct ToolDispatcher<E, P, I, R, M> {
    empresas: E,
    productos: P,
    inventarios: I,
    renderer: R,
    mailer: M,
    settings: ToolSettings,
}

impl<E, P, I, R, M> ToolDispatcher<E, P, I, R, M>
where
    E: EmpresaRepository,
    P: ProductoRepository,
    I: InventarioRepository,
    R: ReportRenderer,
    M: Mailer,
{
    pub fn new(empresas: E, productos: P, inventarios: I, renderer: R, mailer: M) -> Self {
        Self {
            empresas,
            productos,
            inventarios,
            renderer,
            mailer,
            settings: ToolSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ToolSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> ToolSettings {
        self.settings
    }

    /// Run one tool call. Never fails: errors become failure responses.
    pub fn dispatch(&self, principal: &Principal, name: &str, args: Value) -> ToolResponse {
        info!(
            tool = name,
            user_id = %principal.user_id,
            role = principal.role.as_str(),
            "tool call"
        );
        match self.call(principal, name, args) {
            Ok(response) => response,
            Err(err) => {
                warn!(tool = name, code = err.code(), error = %err, "tool call failed");
                ToolResponse::from_error(name, &err)
            }
        }
    }

    fn call(&self, principal: &Principal, name: &str, args: Value) -> Result<ToolResponse, ToolError> {
        match name {
            "create_empresa" => {
                require_write(principal)?;
                let mut input: CreateEmpresa = parse_args(name, args)?;
                input.user_id = Some(principal.user_id.to_string());
                let empresa = CreateEmpresaUseCase::new(&self.empresas).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&empresa.snapshot())?,
                    format!("Empresa {} creada", empresa.nombre()),
                ))
            }
            "list_empresas" => {
                let input: ListEmpresas = parse_args(name, args)?;
                let empresas = ListEmpresasUseCase::new(&self.empresas)
                    .with_default_limit(self.settings.list_limit)
                    .execute(input)?;
                let rows = encode_all(empresas.iter().map(|e| e.snapshot()))?;
                let message = format!("{} empresas encontradas", rows.len());
                Ok(ToolResponse::list(rows, message))
            }
            "get_empresa" => {
                let NitArgs { nit } = parse_args(name, args)?;
                let empresa = GetEmpresaUseCase::new(&self.empresas).execute(&nit)?;
                Ok(ToolResponse::ok(
                    encode(&empresa.snapshot())?,
                    format!("Empresa {}", empresa.nombre()),
                ))
            }
            "update_empresa" => {
                require_write(principal)?;
                let input: UpdateEmpresa = parse_args(name, args)?;
                let empresa = UpdateEmpresaUseCase::new(&self.empresas).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&empresa.snapshot())?,
                    format!("Empresa {} actualizada", empresa.nit()),
                ))
            }
            "delete_empresa" => {
                require_write(principal)?;
                let NitArgs { nit } = parse_args(name, args)?;
                DeleteEmpresaUseCase::new(&self.empresas).execute(&nit)?;
                Ok(ToolResponse::done(format!("Empresa {nit} eliminada")))
            }
            "create_producto" => {
                require_write(principal)?;
                let mut input: CreateProducto = parse_args(name, args)?;
                input.user_id = Some(principal.user_id.to_string());
                let producto =
                    CreateProductoUseCase::new(&self.productos, &self.empresas).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&producto.snapshot())?,
                    format!("Producto {} creado", producto.nombre()),
                ))
            }
            "list_productos" => {
                let input: ListProductos = parse_args(name, args)?;
                let productos = ListProductosUseCase::new(&self.productos)
                    .with_default_limit(self.settings.list_limit)
                    .execute(input)?;
                let rows = encode_all(productos.iter().map(|p| p.snapshot()))?;
                let message = format!("{} productos encontrados", rows.len());
                Ok(ToolResponse::list(rows, message))
            }
            "get_producto" => {
                let CodigoArgs { codigo } = parse_args(name, args)?;
                let producto = GetProductoUseCase::new(&self.productos).execute(&codigo)?;
                Ok(ToolResponse::ok(
                    encode(&producto.snapshot())?,
                    format!("Producto {}", producto.nombre()),
                ))
            }
            "update_producto" => {
                require_write(principal)?;
                let input: UpdateProducto = parse_args(name, args)?;
                let producto = UpdateProductoUseCase::new(&self.productos).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&producto.snapshot())?,
                    format!("Producto {} actualizado", producto.codigo()),
                ))
            }
            "delete_producto" => {
                require_write(principal)?;
                let CodigoArgs { codigo } = parse_args(name, args)?;
                DeleteProductoUseCase::new(&self.productos).execute(&codigo)?;
                Ok(ToolResponse::done(format!("Producto {codigo} eliminado")))
            }
            "set_producto_precio" => {
                require_write(principal)?;
                let input: SetProductoPrecio = parse_args(name, args)?;
                let producto = SetProductoPrecioUseCase::new(&self.productos).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&producto.snapshot())?,
                    format!("Precios de {} actualizados", producto.codigo()),
                ))
            }
            "change_producto_empresa" => {
                require_write(principal)?;
                let input: ChangeProductoEmpresa = parse_args(name, args)?;
                let producto = ChangeProductoEmpresaUseCase::new(&self.productos, &self.empresas)
                    .execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&producto.snapshot())?,
                    format!(
                        "Producto {} asignado a {}",
                        producto.codigo(),
                        producto.empresa_nit()
                    ),
                ))
            }
            "update_inventario" => {
                require_write(principal)?;
                let input: CreateOrUpdateInventario = parse_args(name, args)?;
                let inventario = CreateOrUpdateInventarioUseCase::new(
                    &self.inventarios,
                    &self.empresas,
                    &self.productos,
                )
                .execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&inventario.snapshot())?,
                    format!(
                        "Inventario de {} en {}: {} unidades",
                        inventario.producto_codigo(),
                        inventario.empresa_nit(),
                        inventario.cantidad()
                    ),
                ))
            }
            "get_inventario" => {
                let input: GetInventario = parse_args(name, args)?;
                let inventarios = GetInventarioUseCase::new(&self.inventarios)
                    .with_default_limit(self.settings.list_limit)
                    .execute(input)?;
                let rows = encode_all(inventarios.iter().map(|i| i.snapshot()))?;
                let message = format!("{} registros de inventario", rows.len());
                Ok(ToolResponse::list(rows, message))
            }
            "delete_inventario" => {
                require_write(principal)?;
                let InventarioIdArgs { inventario_id } = parse_args(name, args)?;
                DeleteInventarioUseCase::new(&self.inventarios).execute(inventario_id)?;
                Ok(ToolResponse::done(format!(
                    "Registro de inventario {inventario_id} eliminado"
                )))
            }
            "add_stock" => {
                require_write(principal)?;
                let input: StockMovement = parse_args(name, args)?;
                let inventario = AddStockUseCase::new(&self.inventarios).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&inventario.snapshot())?,
                    format!("Stock actual: {}", inventario.cantidad()),
                ))
            }
            "remove_stock" => {
                require_write(principal)?;
                let input: StockMovement = parse_args(name, args)?;
                let inventario = RemoveStockUseCase::new(&self.inventarios).execute(input)?;
                Ok(ToolResponse::ok(
                    encode(&inventario.snapshot())?,
                    format!("Stock actual: {}", inventario.cantidad()),
                ))
            }
            "get_low_stock_items" => {
                let input: GetLowStockItems = parse_args(name, args)?;
                let threshold = input.threshold.unwrap_or(self.settings.low_stock_threshold);
                let items = GetLowStockItemsUseCase::new(&self.inventarios)
                    .with_default_threshold(self.settings.low_stock_threshold)
                    .execute(input)?;
                let rows = encode_all(items.iter().map(|i| i.snapshot()))?;
                let message = format!("{} productos con stock menor a {threshold}", rows.len());
                Ok(ToolResponse::list(rows, message))
            }
            "get_dashboard_stats" => {
                let stats =
                    GetDashboardStatsUseCase::new(&self.inventarios, &self.empresas, &self.productos)
                        .execute()?;
                Ok(ToolResponse::ok(encode(&stats)?, "Estadísticas del sistema"))
            }
            "export_pdf_inventario" => {
                let ReportArgs { empresa_nit } = parse_args(name, args)?;
                let rows = self.report_rows(empresa_nit.as_deref())?;
                let attachment = self.renderer.render_attachment(&rows)?;
                let mut data = json!({
                    "filename": attachment.filename,
                    "content_type": attachment.content_type,
                    "size_bytes": attachment.bytes.len(),
                    "total_registros": rows.len(),
                });
                if attachment.content_type.starts_with("text/") {
                    data["content"] = Value::String(String::from_utf8_lossy(&attachment.bytes).into_owned());
                }
                let message = format!("Reporte generado con {} registros", rows.len());
                Ok(ToolResponse::ok(data, message))
            }
            "send_email_inventario" => {
                require_write(principal)?;
                let EmailReportArgs { email, empresa_nit } = parse_args(name, args)?;
                let to = Email::new(email)?;
                let rows = self.report_rows(empresa_nit.as_deref())?;
                let attachment = self.renderer.render_attachment(&rows)?;
                let filename = attachment.filename.clone();
                self.mailer.send(&to, REPORT_SUBJECT, attachment)?;
                Ok(ToolResponse::ok(
                    json!({
                        "email": to.as_str(),
                        "filename": filename,
                        "total_registros": rows.len(),
                    }),
                    format!("Reporte enviado a {to}"),
                ))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn report_rows(&self, empresa_nit: Option<&str>) -> Result<Vec<Inventario>, ToolError> {
        Ok(match empresa_nit.filter(|nit| !nit.trim().is_empty()) {
            Some(nit) => self.inventarios.find_by_empresa(&Nit::new(nit)?),
            None => self.inventarios.find_all(Page::all()),
        })
    }
}

/// Decode tool arguments; a missing argument object counts as empty.
fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Encode)
}

fn encode_all<T, It>(values: It) -> Result<Vec<Value>, ToolError>
where
    T: Serialize,
    It: IntoIterator<Item = T>,
{
    values.into_iter().map(|v| encode(&v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use nexus_infra::{
        InMemoryEmpresaRepository, InMemoryInventarioRepository, InMemoryProductoRepository,
    };

    use crate::declarations::ToolDefinitions;
    use crate::reports::{RecordingMailer, TextReportRenderer};

    type Dispatcher = ToolDispatcher<
        InMemoryEmpresaRepository,
        InMemoryProductoRepository,
        InMemoryInventarioRepository,
        TextReportRenderer,
        Arc<RecordingMailer>,
    >;

    fn dispatcher() -> (Dispatcher, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::new());
        let dispatcher = ToolDispatcher::new(
            InMemoryEmpresaRepository::new(),
            InMemoryProductoRepository::new(),
            InMemoryInventarioRepository::new(),
            TextReportRenderer,
            Arc::clone(&mailer),
        );
        (dispatcher, mailer)
    }

    fn admin() -> Principal {
        Principal::admin("admin-1")
    }

    fn seeded() -> (Dispatcher, Arc<RecordingMailer>) {
        let (dispatcher, mailer) = dispatcher();
        let created = dispatcher.dispatch(
            &admin(),
            "create_empresa",
            json!({
                "nit": "900123456",
                "nombre": "TechCorp",
                "direccion": "Calle 123 #45-67",
                "telefono": "3001234567",
                "user_email": "admin@example.com",
            }),
        );
        assert!(created.success, "{created:?}");
        let created = dispatcher.dispatch(
            &admin(),
            "create_producto",
            json!({
                "codigo": "PROD-001",
                "nombre": "Laptop Dell",
                "empresa_nit": "900123456",
            }),
        );
        assert!(created.success, "{created:?}");
        (dispatcher, mailer)
    }

    #[test]
    fn create_empresa_records_the_caller() {
        let (dispatcher, _) = seeded();
        let response = dispatcher.dispatch(&admin(), "get_empresa", json!({ "nit": "900123456" }));

        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data["nombre"], "TechCorp");
        assert_eq!(data["created_by_id"], "admin-1");
    }

    #[test]
    fn external_role_cannot_mutate() {
        let (dispatcher, _) = seeded();
        let response = dispatcher.dispatch(
            &Principal::external("guest"),
            "delete_empresa",
            json!({ "nit": "900123456" }),
        );

        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("unauthorized"));
        assert!(
            dispatcher
                .dispatch(&Principal::external("guest"), "get_empresa", json!({ "nit": "900123456" }))
                .success
        );
    }

    #[test]
    fn duplicate_create_is_reported() {
        let (dispatcher, _) = seeded();
        let response = dispatcher.dispatch(
            &admin(),
            "create_empresa",
            json!({
                "nit": "900123456",
                "nombre": "Otra",
                "direccion": "Calle 1",
                "telefono": "3001234567",
            }),
        );
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("duplicate"));
    }

    #[test]
    fn unknown_tool_and_bad_arguments() {
        let (dispatcher, _) = dispatcher();

        let unknown = dispatcher.dispatch(&admin(), "drop_tables", Value::Null);
        assert_eq!(unknown.code.as_deref(), Some("unknown_tool"));

        let missing = dispatcher.dispatch(&admin(), "get_empresa", json!({}));
        assert_eq!(missing.code.as_deref(), Some("invalid_arguments"));

        let malformed = dispatcher.dispatch(&admin(), "get_empresa", json!({ "nit": "12" }));
        assert_eq!(malformed.code.as_deref(), Some("validation_error"));
    }

    #[test]
    fn list_tools_apply_default_limit() {
        let (dispatcher, _) = dispatcher();
        let dispatcher = dispatcher.with_settings(ToolSettings {
            list_limit: 2,
            low_stock_threshold: 10,
        });
        for nit in ["900000001", "900000002", "900000003"] {
            let response = dispatcher.dispatch(
                &admin(),
                "create_empresa",
                json!({
                    "nit": nit,
                    "nombre": format!("Empresa {nit}"),
                    "direccion": "Calle 1",
                    "telefono": "3001234567",
                }),
            );
            assert!(response.success);
        }

        let page = dispatcher.dispatch(&admin(), "list_empresas", Value::Null);
        assert_eq!(page.total, Some(2));

        let all = dispatcher.dispatch(&admin(), "list_empresas", json!({ "limit": 10 }));
        assert_eq!(all.total, Some(3));

        let filtered = dispatcher.dispatch(&admin(), "list_empresas", json!({ "filtro": "0003" }));
        assert_eq!(filtered.total, Some(1));
    }

    #[test]
    fn stock_flow_through_tools() {
        let (dispatcher, _) = seeded();
        let upserted = dispatcher.dispatch(
            &admin(),
            "update_inventario",
            json!({ "empresa_nit": "900123456", "producto_codigo": "prod-001", "cantidad": 20 }),
        );
        assert!(upserted.success, "{upserted:?}");
        let id = upserted.data.unwrap()["id"].as_u64().unwrap();

        let removed = dispatcher.dispatch(
            &admin(),
            "remove_stock",
            json!({ "inventario_id": id, "cantidad": 15 }),
        );
        assert_eq!(removed.data.unwrap()["cantidad"], 5);

        let too_many = dispatcher.dispatch(
            &admin(),
            "remove_stock",
            json!({ "inventario_id": id, "cantidad": 50 }),
        );
        assert_eq!(too_many.code.as_deref(), Some("insufficient_stock"));

        let low = dispatcher.dispatch(&admin(), "get_low_stock_items", Value::Null);
        assert_eq!(low.total, Some(1));

        let stats = dispatcher.dispatch(&admin(), "get_dashboard_stats", Value::Null);
        assert_eq!(stats.data.unwrap()["total_inventario"], 5);

        let deleted = dispatcher.dispatch(&admin(), "delete_inventario", json!({ "inventario_id": id }));
        assert!(deleted.success);
        let gone = dispatcher.dispatch(&admin(), "add_stock", json!({ "inventario_id": id, "cantidad": 1 }));
        assert_eq!(gone.code.as_deref(), Some("not_found"));
    }

    #[test]
    fn price_and_ownership_tools() {
        let (dispatcher, _) = seeded();
        dispatcher.dispatch(
            &admin(),
            "create_empresa",
            json!({
                "nit": "800999888",
                "nombre": "Distribuciones",
                "direccion": "Carrera 7 #10-20",
                "telefono": "3109876543",
            }),
        );

        let priced = dispatcher.dispatch(
            &admin(),
            "set_producto_precio",
            json!({ "codigo": "PROD-001", "moneda": "cop", "precio": "2500000" }),
        );
        assert!(priced.success, "{priced:?}");

        let moved = dispatcher.dispatch(
            &admin(),
            "change_producto_empresa",
            json!({ "codigo": "PROD-001", "empresa_nit": "800999888" }),
        );
        assert_eq!(moved.data.unwrap()["empresa_nit"], "800999888");

        let listed = dispatcher.dispatch(
            &admin(),
            "list_productos",
            json!({ "empresa_nit": "800999888" }),
        );
        assert_eq!(listed.total, Some(1));
    }

    #[test]
    fn reports_render_and_send() {
        let (dispatcher, mailer) = seeded();
        dispatcher.dispatch(
            &admin(),
            "update_inventario",
            json!({ "empresa_nit": "900123456", "producto_codigo": "PROD-001", "cantidad": 3 }),
        );

        let exported = dispatcher.dispatch(&admin(), "export_pdf_inventario", Value::Null);
        let data = exported.data.unwrap();
        assert_eq!(data["total_registros"], 1);
        assert!(data["content"].as_str().unwrap().contains("PROD-001"));

        let denied = dispatcher.dispatch(
            &Principal::external("guest"),
            "send_email_inventario",
            json!({ "email": "ops@example.com" }),
        );
        assert!(!denied.success);
        assert!(mailer.sent().is_empty());

        let bad_email = dispatcher.dispatch(
            &admin(),
            "send_email_inventario",
            json!({ "email": "not-an-email" }),
        );
        assert_eq!(bad_email.code.as_deref(), Some("validation_error"));

        let sent = dispatcher.dispatch(
            &admin(),
            "send_email_inventario",
            json!({ "email": "ops@example.com", "empresa_nit": "900123456" }),
        );
        assert!(sent.success, "{sent:?}");
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "ops@example.com");
        assert_eq!(sent[0].subject, REPORT_SUBJECT);
    }

    #[test]
    fn reports_treat_blank_empresa_as_whole_inventory() {
        let (dispatcher, mailer) = seeded();
        dispatcher.dispatch(
            &admin(),
            "update_inventario",
            json!({ "empresa_nit": "900123456", "producto_codigo": "PROD-001", "cantidad": 3 }),
        );

        let exported =
            dispatcher.dispatch(&admin(), "export_pdf_inventario", json!({ "empresa_nit": "" }));
        assert!(exported.success, "{exported:?}");
        assert_eq!(exported.data.unwrap()["total_registros"], 1);

        let sent = dispatcher.dispatch(
            &admin(),
            "send_email_inventario",
            json!({ "email": "ops@example.com", "empresa_nit": "" }),
        );
        assert!(sent.success, "{sent:?}");
        assert_eq!(mailer.sent().len(), 1);
    }

    #[test]
    fn export_survives_huge_quantities() {
        let (dispatcher, _) = seeded();
        dispatcher.dispatch(
            &admin(),
            "create_producto",
            json!({ "codigo": "PROD-002", "nombre": "Monitor", "empresa_nit": "900123456" }),
        );
        for codigo in ["PROD-001", "PROD-002"] {
            let response = dispatcher.dispatch(
                &admin(),
                "update_inventario",
                json!({ "empresa_nit": "900123456", "producto_codigo": codigo, "cantidad": i64::MAX }),
            );
            assert!(response.success, "{response:?}");
        }

        let exported = dispatcher.dispatch(&admin(), "export_pdf_inventario", json!({}));
        assert!(exported.success, "{exported:?}");
        assert_eq!(exported.data.unwrap()["total_registros"], 2);
    }

    #[test]
    fn every_declared_tool_is_routed() {
        let (dispatcher, _) = dispatcher();
        for name in ToolDefinitions::names() {
            let response = dispatcher.dispatch(&admin(), name, Value::Null);
            assert_ne!(response.code.as_deref(), Some("unknown_tool"), "{name}");
        }
    }
}
