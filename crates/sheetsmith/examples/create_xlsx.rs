//! Example: Create an xlsx file with styles, formulas and a hyperlink

use sheetsmith::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    workbook.settings_mut().title = Some("Inventory".to_string());

    let sheet = workbook.add_worksheet("Stock")?;

    // Header row
    let header = Style::new()
        .with_bold(true)
        .with_fill(PatternFill::solid(Color::LIGHT_GRAY))
        .with_border(CellBorder::BOTTOM);
    for (col, title) in ["Item", "Count", "Double"].into_iter().enumerate() {
        sheet.set_cell_at(0, col as u16, Cell::text(title).with_style(header.clone()))?;
    }
    sheet.freeze_top_row();
    sheet.set_column_width(0, 24.0)?;

    // Data rows
    sheet.set_cell("A2", Cell::text("Item 1"))?;
    sheet.set_cell("B2", Cell::integer(100))?;
    sheet.set_cell("C2", Cell::formula("=B2*2"))?;

    sheet.set_cell("A3", Cell::text("Item 2"))?;
    sheet.set_cell("B3", Cell::integer(200))?;
    sheet.set_cell("C3", Cell::formula("=B3*2"))?;

    // Total row
    sheet.set_cell("A4", Cell::text("Total"))?;
    sheet.set_cell("B4", Cell::formula("SUM(B2:B3)"))?;
    sheet.set_cell("C4", Cell::formula("SUM(C2:C3)"))?;

    sheet.set_cell(
        "A6",
        Cell::text("Supplier catalogue").with_hyperlink("https://example.com/catalogue"),
    )?;

    let path = std::env::temp_dir().join("sheetsmith-example.xlsx");
    workbook.save(&path)?;
    println!("Created {}", path.display());

    Ok(())
}
