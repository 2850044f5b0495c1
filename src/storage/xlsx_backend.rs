use std::{
    fs,
    path::{Path, PathBuf},
};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info, warn};

use crate::{
    errors::LedgerError,
    ledger::{Ledger, Payment, Payments, Purchase, Purchases},
};

use super::{
    cells::{self, EMPTY_CELL},
    LedgerStorage, Result, DATA_COLUMNS, DATA_SHEET, PAYMENTS_SHEET, PAYMENT_COLUMNS,
};

const TMP_SUFFIX: &str = "tmp";
const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

/// Stores both tables in one `.xlsx` workbook with a `Data` and a `Pagos` sheet.
#[derive(Debug, Clone)]
pub struct XlsxStorage {
    path: PathBuf,
}

impl XlsxStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerStorage for XlsxStorage {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no ledger file yet, starting empty");
            return Ok(Ledger::default());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;
        let data = workbook.worksheet_range(DATA_SHEET)?;
        let purchases = read_purchases(&data)?;

        let payments = if workbook
            .sheet_names()
            .iter()
            .any(|name| name == PAYMENTS_SHEET)
        {
            match workbook
                .worksheet_range(PAYMENTS_SHEET)
                .map_err(LedgerError::from)
                .and_then(|range| read_payments(&range))
            {
                Ok(payments) => payments,
                Err(err) => {
                    warn!(error = %err, "payments sheet unreadable, using an empty table");
                    Payments::new()
                }
            }
        } else {
            warn!(sheet = PAYMENTS_SHEET, "payments sheet missing, using an empty table");
            Payments::new()
        };

        info!(
            path = %self.path.display(),
            purchases = purchases.len(),
            payments = payments.len(),
            "ledger loaded"
        );
        Ok(Ledger::new(purchases, payments))
    }

    fn persist(&self, purchases: &Purchases, payments: &Payments) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let date = Format::new().set_num_format(DATE_NUM_FORMAT);

        let sheet = workbook.add_worksheet();
        sheet.set_name(DATA_SHEET)?;
        write_purchases(sheet, purchases, &header, &date)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(PAYMENTS_SHEET)?;
        write_payments(sheet, payments, &header, &date)?;

        let tmp = tmp_path(&self.path);
        workbook.save(&tmp)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            path = %self.path.display(),
            purchases = purchases.len(),
            payments = payments.len(),
            "ledger persisted"
        );
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Positions of the canonical columns within a sheet's header row.
struct ColumnMap {
    sheet: &'static str,
    indices: Vec<usize>,
}

impl ColumnMap {
    fn locate(range: &Range<Data>, sheet: &'static str, columns: &[&str]) -> Result<Self> {
        let header: Vec<String> = range
            .rows()
            .next()
            .map(|row| row.iter().map(|cell| cells::text(cell).to_uppercase()).collect())
            .unwrap_or_default();

        let mut indices = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();
        for column in columns {
            let wanted = column.to_uppercase();
            match header.iter().position(|name| *name == wanted) {
                Some(index) => indices.push(index),
                None => missing.push(*column),
            }
        }
        if !missing.is_empty() {
            return Err(LedgerError::Schema(format!(
                "sheet `{}` is missing columns: {}",
                sheet,
                missing.join(", ")
            )));
        }
        Ok(Self { sheet, indices })
    }

    fn cell<'a>(&self, row: &'a [Data], column: usize) -> &'a Data {
        row.get(self.indices[column]).unwrap_or(&EMPTY_CELL)
    }

    fn error(&self, line: usize, column: &str, expected: &str) -> LedgerError {
        LedgerError::Schema(format!(
            "sheet `{}` row {} column `{}`: expected {}",
            self.sheet, line, column, expected
        ))
    }
}

/// Iterates data rows with their 1-based sheet line, skipping blank rows.
///
/// The range starts at the first used cell, so its offset is added back.
fn data_rows(range: &Range<Data>) -> impl Iterator<Item = (usize, &[Data])> {
    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);
    range
        .rows()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| !row.iter().all(cells::is_blank))
        .map(move |(index, row)| (first_line + index, row))
}

fn read_purchases(range: &Range<Data>) -> Result<Purchases> {
    if range.is_empty() {
        return Ok(Purchases::new());
    }
    let map = ColumnMap::locate(range, DATA_SHEET, &DATA_COLUMNS)?;
    let mut rows = Vec::new();
    for (line, row) in data_rows(range) {
        let text = |column: usize| cells::text(map.cell(row, column));
        let amount = |column: usize| {
            cells::number(map.cell(row, column))
                .ok_or_else(|| map.error(line, DATA_COLUMNS[column], "a number"))
        };
        let date = cells::date(map.cell(row, 2))
            .ok_or_else(|| map.error(line, DATA_COLUMNS[2], "a date"))?;
        let boxes = cells::whole_number(map.cell(row, 3))
            .ok_or_else(|| map.error(line, DATA_COLUMNS[3], "a whole number"))?;

        rows.push(Purchase {
            farmer: text(0),
            location: text(1),
            date,
            boxes,
            purchase_price: amount(4)?,
            total_cost: amount(5)?,
            packaging: text(6),
            crop: text(7),
            client: text(8),
            sale_price: amount(9)?,
        });
    }
    debug!(rows = rows.len(), "read purchases sheet");
    Ok(rows.into_iter().collect())
}

fn read_payments(range: &Range<Data>) -> Result<Payments> {
    if range.is_empty() {
        return Ok(Payments::new());
    }
    let map = ColumnMap::locate(range, PAYMENTS_SHEET, &PAYMENT_COLUMNS)?;
    let mut rows = Vec::new();
    for (line, row) in data_rows(range) {
        let date = cells::date(map.cell(row, 1))
            .ok_or_else(|| map.error(line, PAYMENT_COLUMNS[1], "a date"))?;
        let amount = cells::number(map.cell(row, 2))
            .ok_or_else(|| map.error(line, PAYMENT_COLUMNS[2], "a number"))?;
        rows.push(Payment {
            farmer: cells::text(map.cell(row, 0)),
            date,
            amount,
        });
    }
    debug!(rows = rows.len(), "read payments sheet");
    Ok(rows.into_iter().collect())
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<()> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, column_index(col)?, *name, format)?;
    }
    Ok(())
}

fn write_purchases(
    sheet: &mut Worksheet,
    purchases: &Purchases,
    header: &Format,
    date: &Format,
) -> Result<()> {
    write_header(sheet, &DATA_COLUMNS, header)?;
    for (index, purchase) in purchases.iter().enumerate() {
        let row = row_index(index)?;
        write_text(sheet, row, 0, &purchase.farmer)?;
        write_text(sheet, row, 1, &purchase.location)?;
        write_date(sheet, row, 2, purchase.date, date)?;
        sheet.write_number(row, 3, f64::from(purchase.boxes))?;
        sheet.write_number(row, 4, purchase.purchase_price)?;
        sheet.write_number(row, 5, purchase.total_cost)?;
        write_text(sheet, row, 6, &purchase.packaging)?;
        write_text(sheet, row, 7, &purchase.crop)?;
        write_text(sheet, row, 8, &purchase.client)?;
        sheet.write_number(row, 9, purchase.sale_price)?;
    }
    Ok(())
}

fn write_payments(
    sheet: &mut Worksheet,
    payments: &Payments,
    header: &Format,
    date: &Format,
) -> Result<()> {
    write_header(sheet, &PAYMENT_COLUMNS, header)?;
    for (index, payment) in payments.iter().enumerate() {
        let row = row_index(index)?;
        write_text(sheet, row, 0, &payment.farmer)?;
        write_date(sheet, row, 1, payment.date, date)?;
        sheet.write_number(row, 2, payment.amount)?;
    }
    Ok(())
}

/// Dates go out as serial numbers so spreadsheet apps treat them as dates.
fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: NaiveDate,
    format: &Format,
) -> Result<()> {
    let serial = cells::date_to_excel_serial(value).ok_or_else(|| {
        LedgerError::Schema(format!(
            "date {} is outside the range a sheet can store (1900-01-01 to 9999-12-31)",
            value
        ))
    })?;
    sheet.write_number_with_format(row, col, serial, format)?;
    Ok(())
}

/// Blank strings are left as empty cells.
fn write_text(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    if !value.is_empty() {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn row_index(index: usize) -> Result<u32> {
    index
        .checked_add(1)
        .and_then(|row| u32::try_from(row).ok())
        .ok_or_else(|| LedgerError::Schema(format!("row {} exceeds sheet capacity", index)))
}

fn column_index(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| LedgerError::Schema(format!("column {} exceeds sheet capacity", index)))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_keeps_original_extension() {
        let tmp = tmp_path(Path::new("/data/compras.xlsx"));
        assert_eq!(tmp, PathBuf::from("/data/compras.xlsx.tmp"));
        assert_eq!(tmp_path(Path::new("ledger")), PathBuf::from("ledger.tmp"));
    }

    #[test]
    fn missing_file_loads_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let storage = XlsxStorage::new(dir.path().join("absent.xlsx"));
        let ledger = storage.load().unwrap();
        assert!(ledger.is_empty());
    }
}
