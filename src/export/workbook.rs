//! Xlsx generation for the audit and verification result sets.
//!
//! Both sheets are right-to-left with Arabic headers in schema order;
//! the requirements ratio rides in an appended column whose fill marks
//! fully-complete rows apart from incomplete ones.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use super::ExportError;
use crate::pipeline::aggregate::requirements_counts;
use crate::pipeline::types::{BatchResult, Record};
use crate::schema::{Schema, PRESENT};

const AUDIT_SHEET: &str = "تقارير التدقيق";
const VERIFICATION_SHEET: &str = "نتائج التحقق";
pub(crate) const REQUIREMENTS_HEADER: &str = "إتمام المتطلبات";

const COMPLETE_FILL: u32 = 0xC6EFCE;
const INCOMPLETE_FILL: u32 = 0xFFC7CE;

fn header_format() -> Format {
    Format::new().set_bold()
}

fn complete_format() -> Format {
    Format::new().set_background_color(Color::RGB(COMPLETE_FILL))
}

fn incomplete_format() -> Format {
    Format::new().set_background_color(Color::RGB(INCOMPLETE_FILL))
}

/// Width heuristic: widest cell text plus padding, clamped so one
/// verbose value cannot blow a column out.
fn size_columns(worksheet: &mut Worksheet, widths: &[usize]) -> Result<(), XlsxError> {
    for (col, chars) in widths.iter().enumerate() {
        let width = (*chars as f64 + 2.0).clamp(10.0, 50.0);
        worksheet.set_column_width(col as u16, width)?;
    }
    Ok(())
}

fn track_width(widths: &mut [usize], col: usize, text: &str) {
    let chars = text.chars().count();
    if chars > widths[col] {
        widths[col] = chars;
    }
}

/// Serialize the audit records into a finished xlsx file.
///
/// One column per schema field plus the appended requirements column.
/// Numbers land as numeric cells, a well-formed http(s) coordinates
/// value becomes a hyperlink, everything absent renders as the literal
/// sentinel.
pub fn audit_workbook(records: &[Record], schema: &Schema) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(AUDIT_SHEET)?;
    worksheet.set_right_to_left(true);

    let fields = schema.fields();
    let requirements_col = fields.len();
    let mut widths = vec![0usize; fields.len() + 1];

    let header = header_format();
    for (col, field) in fields.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, field.label, &header)?;
        track_width(&mut widths, col, field.label);
    }
    worksheet.write_string_with_format(0, requirements_col as u16, REQUIREMENTS_HEADER, &header)?;
    track_width(&mut widths, requirements_col, REQUIREMENTS_HEADER);

    let complete = complete_format();
    let incomplete = incomplete_format();
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, field) in fields.iter().enumerate() {
            let value = record.get(field.key);
            match value.and_then(|v| v.as_f64()) {
                Some(n) if field.kind.is_numeric() => {
                    worksheet.write_number(row, col as u16, n)?;
                    track_width(&mut widths, col, &n.to_string());
                }
                _ => {
                    let text = record.display(field.key);
                    if field.key == "propertyCoordinates" && is_web_link(&text) {
                        worksheet.write_url(row, col as u16, text.as_str())?;
                    } else {
                        worksheet.write_string(row, col as u16, &text)?;
                    }
                    track_width(&mut widths, col, &text);
                }
            }
        }

        let (met, total) = requirements_counts(record, schema);
        let ratio = record
            .requirements_met
            .clone()
            .unwrap_or_else(|| format!("{met}/{total}"));
        let fill = if met == total { &complete } else { &incomplete };
        worksheet.write_string_with_format(row, requirements_col as u16, &ratio, fill)?;
        track_width(&mut widths, requirements_col, &ratio);
    }

    size_columns(worksheet, &widths)?;
    Ok(workbook.save_to_buffer()?)
}

/// Serialize the verification results into a finished xlsx file:
/// source file name, report number, then one presence column per
/// checklist item, each cell filled by its own presence.
pub fn verification_workbook(
    results: &[BatchResult],
    schema: &Schema,
) -> Result<Vec<u8>, ExportError> {
    if results.iter().all(|r| r.records.is_empty()) {
        return Err(ExportError::NoRecords);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(VERIFICATION_SHEET)?;
    worksheet.set_right_to_left(true);

    let fields = schema.fields();
    let mut widths = vec![0usize; fields.len() + 2];

    let header = header_format();
    let leading = ["اسم الملف", "رقم التقرير"];
    for (col, title) in leading.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        track_width(&mut widths, col, title);
    }
    for (i, field) in fields.iter().enumerate() {
        let col = i + leading.len();
        worksheet.write_string_with_format(0, col as u16, field.label, &header)?;
        track_width(&mut widths, col, field.label);
    }

    let complete = complete_format();
    let incomplete = incomplete_format();
    let mut row: u32 = 1;
    for result in results {
        for record in &result.records {
            worksheet.write_string(row, 0, &result.document_name)?;
            track_width(&mut widths, 0, &result.document_name);
            let number = record.display("reportNumber");
            worksheet.write_string(row, 1, &number)?;
            track_width(&mut widths, 1, &number);

            for (i, field) in fields.iter().enumerate() {
                let col = i + leading.len();
                let text = record.display(field.key);
                let fill = if text == PRESENT { &complete } else { &incomplete };
                worksheet.write_string_with_format(row, col as u16, &text, fill)?;
                track_width(&mut widths, col, &text);
            }
            row += 1;
        }
    }

    size_columns(worksheet, &widths)?;
    Ok(workbook.save_to_buffer()?)
}

fn is_web_link(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}
