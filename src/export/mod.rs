//! Export adapters: the xlsx workbook writers and the remote sheet
//! push. Both consume the aggregated record set; neither feeds back
//! into the pipeline.

pub mod sheet;
pub mod workbook;

pub use sheet::{sync_to_sheet, HttpSheetTransport, SheetTransport, SyncOutcome};
pub use workbook::{audit_workbook, verification_workbook};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("لا توجد نتائج للتصدير")]
    NoRecords,

    #[error("Workbook generation failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Sheet sync failed: {0}")]
    Transport(String),
}
