use crate::shared::frame::{Frame, OPAQUE};
use crate::transform::resize::resize;

/// Background of empty sheet area (sage green).
pub const SHEET_BACKGROUND: [u8; 4] = [0xC5, 0xDB, 0xC4, OPAQUE];

/// Height of the strip that flags a cell, such as a face cell with no face.
pub const CELL_FLAG_HEIGHT: u32 = 22;

/// Opacity of the black flag strip.
const FLAG_ALPHA: u32 = 150;

/// Grid geometry for a contact sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactSheetLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Gap kept around each image inside its cell.
    pub padding: u32,
    pub background: [u8; 4],
}

impl Default for ContactSheetLayout {
    fn default() -> Self {
        Self {
            cell_width: 200,
            cell_height: 170,
            padding: 10,
            background: SHEET_BACKGROUND,
        }
    }
}

impl ContactSheetLayout {
    fn image_size(&self) -> (u32, u32) {
        (
            self.cell_width.saturating_sub(2 * self.padding),
            self.cell_height.saturating_sub(2 * self.padding),
        )
    }
}

/// Lays frames out row by row, each scaled into its cell.
///
/// The sheet is as wide as the longest row; short rows leave background.
pub fn compose_contact_sheet(rows: &[Vec<&Frame>], layout: &ContactSheetLayout) -> Frame {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
    let width = columns * layout.cell_width;
    let height = rows.len() as u32 * layout.cell_height;
    let mut sheet = Frame::filled(width, height, layout.background, 0);

    let (iw, ih) = layout.image_size();
    if iw == 0 || ih == 0 {
        return sheet;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, frame) in row.iter().enumerate() {
            let x = c as u32 * layout.cell_width + layout.padding;
            let y = r as u32 * layout.cell_height + layout.padding;
            sheet.paste(&resize(frame, iw, ih), x as i32, y as i32);
        }
    }
    sheet
}

/// Darkens the bottom `height` rows of the image in cell (`row`, `col`),
/// the sheet's cue that the cell needs attention. Clipped to the image area.
pub fn flag_cell(sheet: &mut Frame, layout: &ContactSheetLayout, row: u32, col: u32, height: u32) {
    let (iw, ih) = layout.image_size();
    let x0 = col * layout.cell_width + layout.padding;
    let y_end = row * layout.cell_height + layout.padding + ih;
    let y0 = y_end - height.min(ih);
    let x_end = (x0 + iw).min(sheet.width());
    let y_end = y_end.min(sheet.height());

    for y in y0..y_end {
        for x in x0..x_end {
            let [r, g, b, a] = sheet.pixel(x, y);
            let shade = |c: u8| ((c as u32 * (255 - FLAG_ALPHA) + 127) / 255) as u8;
            sheet.set_pixel(x, y, [shade(r), shade(g), shade(b), a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ContactSheetLayout {
        ContactSheetLayout {
            cell_width: 20,
            cell_height: 10,
            padding: 2,
            background: [0, 0, 0, 255],
        }
    }

    #[test]
    fn test_sheet_size_follows_grid() {
        let a = Frame::filled(4, 4, [255, 0, 0, 255], 0);
        let sheet = compose_contact_sheet(&[vec![&a, &a, &a], vec![&a]], &layout());
        assert_eq!((sheet.width(), sheet.height()), (60, 20));
    }

    #[test]
    fn test_cells_are_placed_in_order_with_padding() {
        let red = Frame::filled(16, 6, [255, 0, 0, 255], 0);
        let blue = Frame::filled(16, 6, [0, 0, 255, 255], 0);
        let sheet = compose_contact_sheet(&[vec![&red, &blue]], &layout());
        assert_eq!(sheet.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(sheet.pixel(2, 2), [255, 0, 0, 255]);
        assert_eq!(sheet.pixel(17, 7), [255, 0, 0, 255]);
        assert_eq!(sheet.pixel(18, 8), [0, 0, 0, 255]);
        assert_eq!(sheet.pixel(22, 2), [0, 0, 255, 255]);
    }

    #[test]
    fn test_short_rows_leave_background() {
        let red = Frame::filled(16, 6, [255, 0, 0, 255], 0);
        let sheet = compose_contact_sheet(&[vec![&red, &red], vec![&red]], &layout());
        assert_eq!(sheet.pixel(30, 15), [0, 0, 0, 255]);
        assert_eq!(sheet.pixel(5, 15), [255, 0, 0, 255]);
    }

    #[test]
    fn test_flag_cell_darkens_image_bottom() {
        let white = Frame::filled(16, 6, [255, 255, 255, 255], 0);
        let mut sheet = compose_contact_sheet(&[vec![&white, &white]], &layout());
        flag_cell(&mut sheet, &layout(), 0, 0, 2);
        // 255 * 105 / 255 = 105
        assert_eq!(sheet.pixel(2, 6), [105, 105, 105, 255]);
        assert_eq!(sheet.pixel(17, 7), [105, 105, 105, 255]);
        assert_eq!(sheet.pixel(2, 5), [255, 255, 255, 255]);
        assert_eq!(sheet.pixel(1, 7), [0, 0, 0, 255]);
        assert_eq!(sheet.pixel(22, 7), [255, 255, 255, 255]);
    }

    #[test]
    fn test_flag_taller_than_image_is_clipped() {
        let white = Frame::filled(16, 6, [255, 255, 255, 255], 0);
        let mut sheet = compose_contact_sheet(&[vec![&white]], &layout());
        flag_cell(&mut sheet, &layout(), 0, 0, CELL_FLAG_HEIGHT);
        assert_eq!(sheet.pixel(2, 2), [105, 105, 105, 255]);
        assert_eq!(sheet.pixel(2, 1), [0, 0, 0, 255]);
        assert_eq!(sheet.pixel(2, 8), [0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_grid() {
        let sheet = compose_contact_sheet(&[], &layout());
        assert!(sheet.is_empty());
    }
}
