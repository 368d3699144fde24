//! Report rendering and delivery ports.
//!
//! PDF rendering and SMTP stay outside this workspace; these traits are the
//! seam. The plain-text renderer and the recording mailer back the tool
//! binary and the tests.

use std::fmt::Write as _;
use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;

use nexus_core::Email;
use nexus_inventario::{Inventario, StockStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("report rendering failed: {0}")]
    Render(String),

    #[error("report delivery failed: {0}")]
    Delivery(String),
}

/// A rendered report ready to be stored or attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait ReportRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_extension(&self) -> &'static str;

    fn render_inventory(&self, inventario: &[Inventario]) -> Result<Vec<u8>, ReportError>;

    /// Render and wrap as an [`Attachment`] named after the current date.
    fn render_attachment(&self, inventario: &[Inventario]) -> Result<Attachment, ReportError> {
        Ok(Attachment {
            filename: format!(
                "inventario_{}.{}",
                Utc::now().format("%Y%m%d_%H%M%S"),
                self.file_extension()
            ),
            content_type: self.content_type(),
            bytes: self.render_inventory(inventario)?,
        })
    }
}

pub trait Mailer: Send + Sync {
    fn send(&self, to: &Email, subject: &str, attachment: Attachment) -> Result<(), ReportError>;
}

/// Fixed-width text table, one row per record, followed by a summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReportRenderer;

impl ReportRenderer for TextReportRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render_inventory(&self, inventario: &[Inventario]) -> Result<Vec<u8>, ReportError> {
        let mut out = String::new();
        let total = inventario
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.cantidad().value()));
        let agotados = inventario
            .iter()
            .filter(|i| i.stock_status() == StockStatus::Agotado)
            .count();

        writeln!(out, "REPORTE DE INVENTARIO").map_err(render_failed)?;
        writeln!(out, "Generado: {}\n", Utc::now().format("%Y-%m-%d %H:%M UTC"))
            .map_err(render_failed)?;
        writeln!(
            out,
            "{:<6} {:<15} {:<20} {:>10} {:<8}",
            "ID", "EMPRESA", "PRODUCTO", "CANTIDAD", "ESTADO"
        )
        .map_err(render_failed)?;
        for row in inventario {
            let id = row.id().map(|id| id.to_string()).unwrap_or_default();
            writeln!(
                out,
                "{:<6} {:<15} {:<20} {:>10} {:<8}",
                id,
                row.empresa_nit().as_str(),
                row.producto_codigo().as_str(),
                row.cantidad().value(),
                row.stock_status().as_str()
            )
            .map_err(render_failed)?;
        }
        writeln!(
            out,
            "\nRegistros: {}\nUnidades: {}\nAgotados: {}",
            inventario.len(),
            total,
            agotados
        )
        .map_err(render_failed)?;

        Ok(out.into_bytes())
    }
}

fn render_failed(err: std::fmt::Error) -> ReportError {
    ReportError::Render(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: Email,
    pub subject: String,
    pub attachment: Attachment,
}

/// Keeps every message in memory instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, to: &Email, subject: &str, attachment: Attachment) -> Result<(), ReportError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| ReportError::Delivery("mailbox lock poisoned".to_string()))?;
        sent.push(SentMail {
            to: to.clone(),
            subject: subject.to_string(),
            attachment,
        });
        Ok(())
    }
}

impl<M: Mailer + ?Sized> Mailer for std::sync::Arc<M> {
    fn send(&self, to: &Email, subject: &str, attachment: Attachment) -> Result<(), ReportError> {
        (**self).send(to, subject, attachment)
    }
}
