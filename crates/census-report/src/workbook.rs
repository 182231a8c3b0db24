//! Office Open XML workbook assembly.
//!
//! The workbook has a single sheet, `Report`, with the enriched table at
//! `A1` and a branded side panel to its right. Parts are written with
//! `quick-xml` and packed with `zip`; strings are stored inline so no shared
//! string table is needed.

use std::io::{Cursor, Write};

use census_model::{CellValue, EnrichedTable, OutputColumn, SummaryMetrics};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{ReportError, Result};
use crate::metadata::{PANEL_BLOCKS, REPORT_TITLE, ReportMetadata};
use crate::sheet::{
    DATA_COLUMN_WIDTH, MAX_CELL_CHARS, MAX_SHEET_COLUMNS, MAX_SHEET_ROWS, PANEL_COLUMN_WIDTH,
    SPACER_COLUMN_WIDTH, SPACER_COLUMNS, SheetGeometry, cell_ref, sheet_text,
};

pub const SHEET_NAME: &str = "Report";

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const OFFICE_REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Cell format indexes into `cellXfs` of the generated stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Default = 0,
    Bold = 1,
    Title = 2,
    Wrapped = 3,
    Link = 4,
    Currency = 5,
    Thousands = 6,
    OneDecimal = 7,
}

impl Style {
    fn for_column(column: OutputColumn) -> Self {
        match column {
            OutputColumn::HouseholdIncome => Self::Currency,
            OutputColumn::MedianAge => Self::OneDecimal,
            OutputColumn::ZipPopulation => Self::Thousands,
            OutputColumn::Source(_) => Self::Default,
        }
    }
}

struct SheetCell {
    column: usize,
    value: CellValue,
    style: Style,
}

/// Builds the report workbook and returns the `.xlsx` bytes.
///
/// Tables past the worksheet row or column limits and cells longer than
/// [`MAX_CELL_CHARS`] are rejected. Characters XML cannot carry are dropped
/// from text cells.
pub fn assemble_workbook(
    table: &EnrichedTable,
    metrics: &SummaryMetrics,
    metadata: &ReportMetadata,
) -> Result<Vec<u8>> {
    check_sheet_bounds(table.height(), table.width())?;
    let geometry = SheetGeometry::for_width(table.width());
    let link = PANEL_BLOCKS.iter().find_map(|block| {
        block
            .link
            .map(|url| (cell_ref(geometry.panel_column, block.row + 1), url))
    });

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, Vec<u8>); 7] = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", root_rels_xml()?),
        ("xl/workbook.xml", workbook_xml()?),
        ("xl/_rels/workbook.xml.rels", workbook_rels_xml()?),
        ("xl/styles.xml", styles_xml()?),
        (
            "xl/worksheets/sheet1.xml",
            sheet_xml(table, metadata, geometry, link.as_ref().map(|(r, _)| r.as_str()))?,
        ),
        (
            "xl/worksheets/_rels/sheet1.xml.rels",
            sheet_rels_xml(link.map(|(_, url)| url))?,
        ),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes).map_err(zip::result::ZipError::Io)?;
    }
    let bytes = zip.finish()?.into_inner();

    tracing::debug!(
        rows = table.height(),
        columns = table.width(),
        matched_rows = metrics.matched_rows,
        bytes = bytes.len(),
        "assembled workbook"
    );
    Ok(bytes)
}

/// Rejects tables the worksheet cannot hold next to the header row and the
/// side panel.
fn check_sheet_bounds(rows: usize, columns: usize) -> Result<()> {
    if rows >= MAX_SHEET_ROWS {
        return Err(ReportError::TooManyRows {
            rows,
            max: MAX_SHEET_ROWS - 1,
        });
    }
    if SheetGeometry::for_width(columns).panel_column >= MAX_SHEET_COLUMNS {
        return Err(ReportError::TooManyColumns {
            columns,
            max: MAX_SHEET_COLUMNS - SPACER_COLUMNS - 1,
        });
    }
    Ok(())
}

fn xml_writer() -> Result<Writer<Vec<u8>>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;
    Ok(xml)
}

fn empty(xml: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    xml.write_event(Event::Empty(elem))?;
    Ok(())
}

fn start(xml: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    xml.write_event(Event::Start(elem))?;
    Ok(())
}

fn end(xml: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element(xml: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    let attrs: &[(&str, &str)] = if text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
    {
        &[("xml:space", "preserve")]
    } else {
        &[]
    };
    start(xml, name, attrs)?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    end(xml, name)
}

fn content_types_xml() -> Result<Vec<u8>> {
    let mut xml = xml_writer()?;
    start(&mut xml, "Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    empty(
        &mut xml,
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    empty(
        &mut xml,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (part, content_type) in [
        (
            "/xl/workbook.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        ),
        (
            "/xl/worksheets/sheet1.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
        ),
        (
            "/xl/styles.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
        ),
    ] {
        empty(
            &mut xml,
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    end(&mut xml, "Types")?;
    Ok(xml.into_inner())
}

fn relationships_xml(relationships: &[(&str, &str, &str, bool)]) -> Result<Vec<u8>> {
    let mut xml = xml_writer()?;
    start(&mut xml, "Relationships", &[("xmlns", PACKAGE_REL_NS)])?;
    for &(id, kind, target, external) in relationships {
        let mut attrs = vec![("Id", id), ("Type", kind), ("Target", target)];
        if external {
            attrs.push(("TargetMode", "External"));
        }
        empty(&mut xml, "Relationship", &attrs)?;
    }
    end(&mut xml, "Relationships")?;
    Ok(xml.into_inner())
}

fn root_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[("rId1", REL_OFFICE_DOCUMENT, "xl/workbook.xml", false)])
}

fn workbook_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1", REL_WORKSHEET, "worksheets/sheet1.xml", false),
        ("rId2", REL_STYLES, "styles.xml", false),
    ])
}

fn sheet_rels_xml(link: Option<&str>) -> Result<Vec<u8>> {
    match link {
        Some(url) => relationships_xml(&[("rId1", REL_HYPERLINK, url, true)]),
        None => relationships_xml(&[]),
    }
}

fn workbook_xml() -> Result<Vec<u8>> {
    let mut xml = xml_writer()?;
    start(
        &mut xml,
        "workbook",
        &[("xmlns", SPREADSHEET_NS), ("xmlns:r", OFFICE_REL_NS)],
    )?;
    start(&mut xml, "sheets", &[])?;
    empty(
        &mut xml,
        "sheet",
        &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")],
    )?;
    end(&mut xml, "sheets")?;
    end(&mut xml, "workbook")?;
    Ok(xml.into_inner())
}

fn font(xml: &mut Writer<Vec<u8>>, size: &str, bold: bool, link: bool) -> Result<()> {
    start(xml, "font", &[])?;
    if bold {
        empty(xml, "b", &[])?;
    }
    if link {
        empty(xml, "u", &[])?;
    }
    empty(xml, "sz", &[("val", size)])?;
    if link {
        empty(xml, "color", &[("rgb", "FF7030A0")])?;
    }
    empty(xml, "name", &[("val", "Arial")])?;
    end(xml, "font")
}

fn xf(
    xml: &mut Writer<Vec<u8>>,
    num_fmt: &str,
    font_id: &str,
    wrap: bool,
) -> Result<()> {
    let mut attrs = vec![
        ("numFmtId", num_fmt),
        ("fontId", font_id),
        ("fillId", "0"),
        ("borderId", "0"),
        ("xfId", "0"),
    ];
    if num_fmt != "0" {
        attrs.push(("applyNumberFormat", "1"));
    }
    if font_id != "0" {
        attrs.push(("applyFont", "1"));
    }
    if wrap {
        attrs.push(("applyAlignment", "1"));
        start(xml, "xf", &attrs)?;
        empty(xml, "alignment", &[("wrapText", "1"), ("vertical", "top")])?;
        end(xml, "xf")
    } else {
        empty(xml, "xf", &attrs)
    }
}

/// Fonts: 0 Arial 10, 1 Arial 11 bold, 2 Arial 14 bold, 3 Arial 10 purple
/// underlined. The `cellXfs` order matches [`Style`].
fn styles_xml() -> Result<Vec<u8>> {
    let mut xml = xml_writer()?;
    start(&mut xml, "styleSheet", &[("xmlns", SPREADSHEET_NS)])?;

    start(&mut xml, "numFmts", &[("count", "2")])?;
    empty(
        &mut xml,
        "numFmt",
        &[("numFmtId", "164"), ("formatCode", "\"$\"#,##0")],
    )?;
    empty(
        &mut xml,
        "numFmt",
        &[("numFmtId", "165"), ("formatCode", "0.0")],
    )?;
    end(&mut xml, "numFmts")?;

    start(&mut xml, "fonts", &[("count", "4")])?;
    font(&mut xml, "10", false, false)?;
    font(&mut xml, "11", true, false)?;
    font(&mut xml, "14", true, false)?;
    font(&mut xml, "10", false, true)?;
    end(&mut xml, "fonts")?;

    start(&mut xml, "fills", &[("count", "2")])?;
    for pattern in ["none", "gray125"] {
        start(&mut xml, "fill", &[])?;
        empty(&mut xml, "patternFill", &[("patternType", pattern)])?;
        end(&mut xml, "fill")?;
    }
    end(&mut xml, "fills")?;

    start(&mut xml, "borders", &[("count", "1")])?;
    start(&mut xml, "border", &[])?;
    for side in ["left", "right", "top", "bottom", "diagonal"] {
        empty(&mut xml, side, &[])?;
    }
    end(&mut xml, "border")?;
    end(&mut xml, "borders")?;

    start(&mut xml, "cellStyleXfs", &[("count", "1")])?;
    empty(
        &mut xml,
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "0"),
            ("fillId", "0"),
            ("borderId", "0"),
        ],
    )?;
    end(&mut xml, "cellStyleXfs")?;

    start(&mut xml, "cellXfs", &[("count", "8")])?;
    xf(&mut xml, "0", "0", false)?; // Default
    xf(&mut xml, "0", "1", false)?; // Bold
    xf(&mut xml, "0", "2", false)?; // Title
    xf(&mut xml, "0", "0", true)?; // Wrapped
    xf(&mut xml, "0", "3", true)?; // Link
    xf(&mut xml, "164", "0", false)?; // Currency
    xf(&mut xml, "3", "0", false)?; // Thousands
    xf(&mut xml, "165", "0", false)?; // OneDecimal
    end(&mut xml, "cellXfs")?;

    start(&mut xml, "cellStyles", &[("count", "1")])?;
    empty(
        &mut xml,
        "cellStyle",
        &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")],
    )?;
    end(&mut xml, "cellStyles")?;

    end(&mut xml, "styleSheet")?;
    Ok(xml.into_inner())
}

fn panel_cells(metadata: &ReportMetadata, column: usize) -> Vec<(u32, SheetCell)> {
    let cell = |value: String, style| SheetCell {
        column,
        value: CellValue::Text(value),
        style,
    };
    let mut cells = vec![
        (1, cell(REPORT_TITLE.to_string(), Style::Title)),
        (2, cell(metadata.subtitle(), Style::Default)),
    ];
    for block in &PANEL_BLOCKS {
        let body_style = if block.link.is_some() {
            Style::Link
        } else {
            Style::Wrapped
        };
        cells.push((block.row, cell(block.title.to_string(), Style::Bold)));
        cells.push((block.row + 1, cell(block.text.to_string(), body_style)));
    }
    cells
}

fn write_cell(xml: &mut Writer<Vec<u8>>, row: u32, cell: &SheetCell) -> Result<()> {
    let reference = cell_ref(cell.column, row);
    let style = (cell.style as u8).to_string();
    let mut attrs = vec![("r", reference.as_str())];
    if cell.style != Style::Default {
        attrs.push(("s", style.as_str()));
    }

    let number = match &cell.value {
        CellValue::Empty => return Ok(()),
        CellValue::Integer(n) => Some(n.to_string()),
        CellValue::Float(f) if f.is_finite() => Some(f.to_string()),
        CellValue::Float(_) | CellValue::Text(_) => None,
    };

    match number {
        Some(number) => {
            start(xml, "c", &attrs)?;
            text_element(xml, "v", &number)?;
        }
        None => {
            let value = cell.value.to_string();
            let text = sheet_text(&value);
            let length = text.chars().count();
            if length > MAX_CELL_CHARS {
                return Err(ReportError::CellTooLong {
                    cell: reference.clone(),
                    length,
                    max: MAX_CELL_CHARS,
                });
            }
            attrs.push(("t", "inlineStr"));
            start(xml, "c", &attrs)?;
            start(xml, "is", &[])?;
            text_element(xml, "t", &text)?;
            end(xml, "is")?;
        }
    }
    end(xml, "c")
}

fn sheet_xml(
    table: &EnrichedTable,
    metadata: &ReportMetadata,
    geometry: SheetGeometry,
    link_ref: Option<&str>,
) -> Result<Vec<u8>> {
    let mut xml = xml_writer()?;
    start(
        &mut xml,
        "worksheet",
        &[("xmlns", SPREADSHEET_NS), ("xmlns:r", OFFICE_REL_NS)],
    )?;

    let data_width = DATA_COLUMN_WIDTH.to_string();
    let spacer_width = SPACER_COLUMN_WIDTH.to_string();
    let panel_width = PANEL_COLUMN_WIDTH.to_string();
    let mut column_widths = Vec::new();
    if geometry.data_width > 0 {
        column_widths.push((1, geometry.data_width, data_width.as_str()));
    }
    let spacers = geometry.spacer_columns();
    column_widths.push((spacers.start + 1, spacers.end, spacer_width.as_str()));
    column_widths.push((geometry.panel_column + 1, geometry.panel_column + 1, panel_width.as_str()));

    start(&mut xml, "cols", &[])?;
    for (min, max, width) in column_widths {
        let (min, max) = (min.to_string(), max.to_string());
        empty(
            &mut xml,
            "col",
            &[
                ("min", min.as_str()),
                ("max", max.as_str()),
                ("width", width),
                ("customWidth", "1"),
            ],
        )?;
    }
    end(&mut xml, "cols")?;

    let mut panel = panel_cells(metadata, geometry.panel_column).into_iter().peekable();
    let data_rows = table.height() as u32 + 1;
    let last_row = data_rows.max(PANEL_BLOCKS.last().map_or(2, |block| block.row + 1));

    start(&mut xml, "sheetData", &[])?;
    for row in 1..=last_row {
        let mut cells: Vec<SheetCell> = Vec::new();
        if row == 1 {
            cells.extend(table.headers().iter().enumerate().map(|(column, header)| {
                SheetCell {
                    column,
                    value: CellValue::Text(header.clone()),
                    style: Style::Bold,
                }
            }));
        } else if let Some(values) = table.row((row - 2) as usize) {
            cells.extend(
                values
                    .into_iter()
                    .zip(table.layout())
                    .enumerate()
                    .map(|(column, (value, &source))| SheetCell {
                        column,
                        value,
                        style: Style::for_column(source),
                    }),
            );
        }
        while let Some((_, cell)) = panel.next_if(|(panel_row, _)| *panel_row == row) {
            cells.push(cell);
        }
        if cells.iter().all(|cell| cell.value.is_empty()) {
            continue;
        }

        let row_number = row.to_string();
        start(&mut xml, "row", &[("r", row_number.as_str())])?;
        for cell in &cells {
            write_cell(&mut xml, row, cell)?;
        }
        end(&mut xml, "row")?;
    }
    end(&mut xml, "sheetData")?;

    if let Some(reference) = link_ref {
        start(&mut xml, "hyperlinks", &[])?;
        empty(
            &mut xml,
            "hyperlink",
            &[("ref", reference), ("r:id", "rId1")],
        )?;
        end(&mut xml, "hyperlinks")?;
    }

    end(&mut xml, "worksheet")?;
    Ok(xml.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_cover_every_style_index() {
        let styles = String::from_utf8(styles_xml().unwrap()).unwrap();
        assert!(styles.contains(r#"<cellXfs count="8">"#));
        assert_eq!(styles.matches("<xf ").count(), 9);
        assert!(styles.contains(r#"<color rgb="FF7030A0"/>"#));
    }

    #[test]
    fn test_write_cell_kinds() {
        let mut xml = Writer::new(Vec::new());
        let cells = [
            SheetCell {
                column: 0,
                value: CellValue::Integer(34_000),
                style: Style::Thousands,
            },
            SheetCell {
                column: 1,
                value: CellValue::text("a&b"),
                style: Style::Default,
            },
            SheetCell {
                column: 2,
                value: CellValue::Empty,
                style: Style::Default,
            },
        ];
        for cell in &cells {
            write_cell(&mut xml, 3, cell).unwrap();
        }
        let out = String::from_utf8(xml.into_inner()).unwrap();
        assert_eq!(
            out,
            r#"<c r="A3" s="6"><v>34000</v></c><c r="B3" t="inlineStr"><is><t>a&amp;b</t></is></c>"#
        );
    }

    #[test]
    fn test_sheet_bounds() {
        assert!(check_sheet_bounds(MAX_SHEET_ROWS - 1, 5).is_ok());
        assert!(matches!(
            check_sheet_bounds(MAX_SHEET_ROWS, 5),
            Err(ReportError::TooManyRows { max, .. }) if max == MAX_SHEET_ROWS - 1
        ));
        let widest = MAX_SHEET_COLUMNS - SPACER_COLUMNS - 1;
        assert!(check_sheet_bounds(10, widest).is_ok());
        assert!(matches!(
            check_sheet_bounds(10, widest + 1),
            Err(ReportError::TooManyColumns { .. })
        ));
    }

    #[test]
    fn test_write_cell_drops_control_characters() {
        let mut xml = Writer::new(Vec::new());
        let cell = SheetCell {
            column: 0,
            value: CellValue::text("Acme\x0B Corp"),
            style: Style::Default,
        };
        write_cell(&mut xml, 2, &cell).unwrap();
        let out = String::from_utf8(xml.into_inner()).unwrap();
        assert_eq!(
            out,
            r#"<c r="A2" t="inlineStr"><is><t>Acme Corp</t></is></c>"#
        );
    }

    #[test]
    fn test_write_cell_rejects_oversized_text() {
        let mut xml = Writer::new(Vec::new());
        let cell = SheetCell {
            column: 1,
            value: CellValue::text("x".repeat(MAX_CELL_CHARS + 1)),
            style: Style::Default,
        };
        let err = write_cell(&mut xml, 7, &cell).unwrap_err();
        assert!(matches!(
            err,
            ReportError::CellTooLong { ref cell, length, .. }
                if cell == "B7" && length == MAX_CELL_CHARS + 1
        ));
    }
}
