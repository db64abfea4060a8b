use super::sheet::{CellStyle, Sheet};
use crate::error::{Result, ScmError};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, XlsxError};
use std::borrow::Cow;
use std::path::Path;

/// Widths of columns A to H, in characters.
pub const COLUMN_WIDTHS: [f64; 8] = [20.0, 20.0, 50.0, 20.0, 25.0, 20.0, 20.0, 20.0];

const HEADER_FILL: u32 = 0xD9D9D9;
const MONOSPACE_FONT: &str = "Courier New";
const SMALL_FONT_SIZE: f64 = 9.0;

/// Longest string Excel accepts in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;
const CUT_MARKER: char = '…';

/// Write `sheet` as a single-sheet workbook at `path`.
pub fn save(sheet: &Sheet, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (r, cells) in sheet.rows().iter().enumerate() {
        let row = r as u32;
        for (c, cell) in cells.iter().enumerate() {
            let col = c as u16;
            let text = fit_cell(&cell.text, row, col);
            if cell.style == CellStyle::default() {
                if !text.is_empty() {
                    worksheet.write_string(row, col, text.as_ref())?;
                }
                continue;
            }

            let format = format_for(&cell.style);
            if text.is_empty() {
                worksheet.write_blank(row, col, &format)?;
            } else {
                worksheet.write_string_with_format(row, col, text.as_ref(), &format)?;
            }
        }
    }

    if sheet.frozen_rows() > 0 {
        worksheet.set_freeze_panes(sheet.frozen_rows(), 0)?;
    }

    workbook.save(path).map_err(|err| match err {
        XlsxError::IoError(io) => ScmError::Io(io),
        other => ScmError::Xlsx(other),
    })
}

/// Cut `text` to [`MAX_CELL_CHARS`], ending the kept part with `…`.
fn fit_cell(text: &str, row: u32, col: u16) -> Cow<'_, str> {
    let len = text.chars().count();
    if len <= MAX_CELL_CHARS {
        return Cow::Borrowed(text);
    }

    log::warn!("Cell at row {}, column {} cut from {len} to {MAX_CELL_CHARS} characters", row + 1, col + 1);
    let mut cut: String = text.chars().take(MAX_CELL_CHARS - 1).collect();
    cut.push(CUT_MARKER);
    Cow::Owned(cut)
}

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.fill {
        format = format
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_pattern(FormatPattern::Solid);
    }
    if style.align_top {
        format = format.set_align(FormatAlign::Top);
    }
    if style.monospace {
        format = format.set_font_name(MONOSPACE_FONT);
    }
    if style.wrap {
        format = format.set_text_wrap();
    }
    if style.small_font {
        format = format.set_font_size(SMALL_FONT_SIZE);
    }

    let borders = style.borders;
    if borders.left {
        format = format.set_border_left(FormatBorder::Thin);
    }
    if borders.right {
        format = format.set_border_right(FormatBorder::Thin);
    }
    if borders.top {
        format = format.set_border_top(FormatBorder::Thin);
    }
    if borders.bottom {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    format
}
