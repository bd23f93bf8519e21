// Spreadsheet export of the aggregated product list

use crate::error::Result;
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::info;
use wbscrape_client::{Product, SoldCount};

pub const SHEET_NAME: &str = "data";

/// `{base}_{YYYY-MM-DD}.xlsx`, with path separators in `base` replaced by `_`.
pub fn export_file_name(base: &str, run_date: NaiveDate) -> String {
    let base = base.replace(['/', '\\'], "_");
    format!("{}_{}.xlsx", base, run_date.format("%Y-%m-%d"))
}

/// Write `products` to a single-sheet workbook in `dir` and return its path.
pub fn export_products(
    products: &[Product],
    dir: &Path,
    base: &str,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(base, run_date));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in Product::COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }
    for (idx, product) in products.iter().enumerate() {
        write_product_row(worksheet, idx as u32 + 1, product)?;
    }

    workbook.save(&path)?;
    info!("Wrote {} products to {}", products.len(), path.display());
    Ok(path)
}

fn write_product_row(
    worksheet: &mut Worksheet,
    row: u32,
    product: &Product,
) -> std::result::Result<(), XlsxError> {
    worksheet.write_string(row, 0, &product.link)?;
    worksheet.write_number(row, 1, product.article_id as f64)?;
    worksheet.write_string(row, 2, &product.name)?;
    worksheet.write_string(row, 3, &product.brand)?;
    worksheet.write_number(row, 4, product.brand_id as f64)?;
    worksheet.write_number(row, 5, product.price as f64)?;
    worksheet.write_number(row, 6, product.sale_price as f64)?;
    worksheet.write_number(row, 7, product.rating)?;
    worksheet.write_number(row, 8, product.feedback_count as f64)?;
    match product.sold_count {
        SoldCount::Count(count) => worksheet.write_number(row, 9, count as f64)?,
        SoldCount::NoData => worksheet.write_string(row, 9, SoldCount::NO_DATA)?,
    };
    Ok(())
}
