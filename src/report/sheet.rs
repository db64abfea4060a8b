/// Which edges of a cell carry a border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Borders {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Borders {
    pub fn all() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }

    pub fn sides() -> Self {
        Self {
            left: true,
            right: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub fill: bool,
    pub align_top: bool,
    pub monospace: bool,
    pub wrap: bool,
    pub small_font: bool,
    pub borders: Borders,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, CellStyle::default())
    }
}

/// A single worksheet held in memory until it is saved.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
    frozen_rows: u32,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Vec<Cell>> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows kept visible while scrolling.
    pub fn frozen_rows(&self) -> u32 {
        self.frozen_rows
    }

    pub fn freeze_rows(&mut self, rows: u32) {
        self.frozen_rows = rows;
    }
}
