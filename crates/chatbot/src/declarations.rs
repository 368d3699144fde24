//! Function declarations offered to the language model.
//!
//! Every tool the dispatcher routes has exactly one declaration here, with a
//! JSON Schema object describing its arguments.

use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

pub struct ToolDefinitions;

impl ToolDefinitions {
    pub fn all() -> Vec<ToolDeclaration> {
        vec![
            Self::create_empresa(),
            Self::list_empresas(),
            Self::get_empresa(),
            Self::update_empresa(),
            Self::delete_empresa(),
            Self::create_producto(),
            Self::list_productos(),
            Self::get_producto(),
            Self::update_producto(),
            Self::delete_producto(),
            Self::set_producto_precio(),
            Self::change_producto_empresa(),
            Self::update_inventario(),
            Self::get_inventario(),
            Self::delete_inventario(),
            Self::add_stock(),
            Self::remove_stock(),
            Self::get_low_stock_items(),
            Self::get_dashboard_stats(),
            Self::export_pdf_inventario(),
            Self::send_email_inventario(),
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().into_iter().map(|d| d.name).collect()
    }

    pub fn find(name: &str) -> Option<ToolDeclaration> {
        Self::all().into_iter().find(|d| d.name == name)
    }

    pub fn create_empresa() -> ToolDeclaration {
        Self::create_tool(
            "create_empresa",
            "Crea una nueva empresa en el sistema",
            &[
                ("nit", string("NIT único de la empresa, 9 a 10 dígitos")),
                ("nombre", string("Nombre de la empresa")),
                ("direccion", string("Dirección física de la empresa")),
                ("telefono", string("Teléfono de contacto")),
            ],
            &["nit", "nombre", "direccion", "telefono"],
        )
    }

    pub fn list_empresas() -> ToolDeclaration {
        Self::create_tool(
            "list_empresas",
            "Lista las empresas registradas con filtro opcional por nombre",
            &[
                ("filtro", string("Filtro opcional por nombre")),
                ("limit", integer("Límite de resultados (default 10)")),
                ("offset", integer("Registros a omitir")),
            ],
            &[],
        )
    }

    pub fn get_empresa() -> ToolDeclaration {
        Self::create_tool(
            "get_empresa",
            "Obtiene los detalles de una empresa por su NIT",
            &[("nit", string("NIT de la empresa a consultar"))],
            &["nit"],
        )
    }

    pub fn update_empresa() -> ToolDeclaration {
        Self::create_tool(
            "update_empresa",
            "Actualiza los datos de una empresa existente",
            &[
                ("nit", string("NIT de la empresa a actualizar")),
                ("nombre", string("Nuevo nombre (opcional)")),
                ("direccion", string("Nueva dirección (opcional)")),
                ("telefono", string("Nuevo teléfono (opcional)")),
            ],
            &["nit"],
        )
    }

    pub fn delete_empresa() -> ToolDeclaration {
        Self::create_tool(
            "delete_empresa",
            "Elimina una empresa del sistema",
            &[("nit", string("NIT de la empresa a eliminar"))],
            &["nit"],
        )
    }

    pub fn create_producto() -> ToolDeclaration {
        Self::create_tool(
            "create_producto",
            "Crea un nuevo producto asociado a una empresa",
            &[
                ("codigo", string("Código único del producto")),
                ("nombre", string("Nombre del producto")),
                ("empresa_nit", string("NIT de la empresa")),
                ("caracteristicas", string("Características del producto (opcional)")),
            ],
            &["codigo", "nombre", "empresa_nit"],
        )
    }

    pub fn list_productos() -> ToolDeclaration {
        Self::create_tool(
            "list_productos",
            "Lista los productos con filtros opcionales",
            &[
                ("empresa_nit", string("Filtrar por NIT de empresa (opcional)")),
                ("nombre_filtro", string("Filtrar por nombre (opcional)")),
                ("limit", integer("Límite de resultados (default 10)")),
                ("offset", integer("Registros a omitir")),
            ],
            &[],
        )
    }

    pub fn get_producto() -> ToolDeclaration {
        Self::create_tool(
            "get_producto",
            "Obtiene los detalles de un producto por su código",
            &[("codigo", string("Código del producto"))],
            &["codigo"],
        )
    }

    pub fn update_producto() -> ToolDeclaration {
        Self::create_tool(
            "update_producto",
            "Actualiza nombre o características de un producto",
            &[
                ("codigo", string("Código del producto")),
                ("nombre", string("Nuevo nombre (opcional)")),
                ("caracteristicas", string("Nuevas características (opcional)")),
            ],
            &["codigo"],
        )
    }

    pub fn delete_producto() -> ToolDeclaration {
        Self::create_tool(
            "delete_producto",
            "Elimina un producto del sistema",
            &[("codigo", string("Código del producto a eliminar"))],
            &["codigo"],
        )
    }

    pub fn set_producto_precio() -> ToolDeclaration {
        Self::create_tool(
            "set_producto_precio",
            "Fija o elimina el precio de un producto en una moneda",
            &[
                ("codigo", string("Código del producto")),
                ("moneda", string("Moneda: USD, EUR, COP o MXN")),
                (
                    "precio",
                    string("Precio con hasta 2 decimales, p. ej. \"1999.90\"; omitir para eliminar"),
                ),
            ],
            &["codigo", "moneda"],
        )
    }

    pub fn change_producto_empresa() -> ToolDeclaration {
        Self::create_tool(
            "change_producto_empresa",
            "Transfiere un producto a otra empresa",
            &[
                ("codigo", string("Código del producto")),
                ("empresa_nit", string("NIT de la nueva empresa")),
            ],
            &["codigo", "empresa_nit"],
        )
    }

    pub fn update_inventario() -> ToolDeclaration {
        Self::create_tool(
            "update_inventario",
            "Actualiza o crea un registro de inventario con una cantidad absoluta",
            &[
                ("empresa_nit", string("NIT de la empresa")),
                ("producto_codigo", string("Código del producto")),
                ("cantidad", integer("Cantidad en inventario")),
            ],
            &["empresa_nit", "producto_codigo", "cantidad"],
        )
    }

    pub fn get_inventario() -> ToolDeclaration {
        Self::create_tool(
            "get_inventario",
            "Consulta el inventario completo o filtrado por empresa",
            &[
                ("empresa_nit", string("Filtrar por NIT de empresa (opcional)")),
                ("limit", integer("Límite de resultados (default 10)")),
                ("offset", integer("Registros a omitir")),
            ],
            &[],
        )
    }

    pub fn delete_inventario() -> ToolDeclaration {
        Self::create_tool(
            "delete_inventario",
            "Elimina un registro de inventario por su ID",
            &[("inventario_id", integer("ID del registro de inventario"))],
            &["inventario_id"],
        )
    }

    pub fn add_stock() -> ToolDeclaration {
        Self::create_tool(
            "add_stock",
            "Suma unidades a un registro de inventario",
            &[
                ("inventario_id", integer("ID del registro de inventario")),
                ("cantidad", integer("Unidades a sumar")),
            ],
            &["inventario_id", "cantidad"],
        )
    }

    pub fn remove_stock() -> ToolDeclaration {
        Self::create_tool(
            "remove_stock",
            "Descuenta unidades de un registro de inventario",
            &[
                ("inventario_id", integer("ID del registro de inventario")),
                ("cantidad", integer("Unidades a descontar")),
            ],
            &["inventario_id", "cantidad"],
        )
    }

    pub fn get_low_stock_items() -> ToolDeclaration {
        Self::create_tool(
            "get_low_stock_items",
            "Lista los registros con existencias por debajo del umbral",
            &[("threshold", integer("Umbral de stock bajo (default 10)"))],
            &[],
        )
    }

    pub fn get_dashboard_stats() -> ToolDeclaration {
        Self::create_tool(
            "get_dashboard_stats",
            "Obtiene estadísticas generales del sistema (empresas, productos, inventario)",
            &[],
            &[],
        )
    }

    pub fn export_pdf_inventario() -> ToolDeclaration {
        Self::create_tool(
            "export_pdf_inventario",
            "Genera un reporte del inventario",
            &[("empresa_nit", string("NIT de la empresa (opcional)"))],
            &[],
        )
    }

    pub fn send_email_inventario() -> ToolDeclaration {
        Self::create_tool(
            "send_email_inventario",
            "Envía un reporte de inventario por email",
            &[
                ("email", string("Email destino")),
                ("empresa_nit", string("NIT de la empresa (opcional)")),
            ],
            &["email"],
        )
    }

    fn create_tool(
        name: &'static str,
        description: &'static str,
        properties: &[(&str, Value)],
        required: &[&str],
    ) -> ToolDeclaration {
        let properties: Map<String, Value> = properties
            .iter()
            .map(|(key, schema)| (key.to_string(), schema.clone()))
            .collect();
        ToolDeclaration {
            name,
            description,
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn integer(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}
