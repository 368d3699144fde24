//! JSON-lines transport: one request per input line, one response per output line.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nexus_auth::{Principal, Role};
use nexus_empresas::EmpresaRepository;
use nexus_inventario::InventarioRepository;
use nexus_productos::ProductoRepository;

use crate::dispatcher::ToolDispatcher;
use crate::reports::{Mailer, ReportRenderer};
use crate::response::ToolResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    pub role: Role,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl ToolRequest {
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id.as_str(), self.role)
    }
}

/// Answer every non-blank line of `input` until EOF.
pub fn serve<E, P, I, R, M>(
    dispatcher: &ToolDispatcher<E, P, I, R, M>,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<usize>
where
    E: EmpresaRepository,
    P: ProductoRepository,
    I: InventarioRepository,
    R: ReportRenderer,
    M: Mailer,
{
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => {
                dispatcher.dispatch(&request.principal(), &request.name, request.args)
            }
            Err(err) => {
                tracing::warn!(error = %err, "malformed tool request");
                ToolResponse::failure("invalid_request", err.to_string(), "Solicitud inválida")
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
        answered += 1;
    }
    Ok(answered)
}
