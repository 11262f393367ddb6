use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Bordered text table, columns sized to their widest cell.
///
/// ```text
/// +--------+---------+
/// | Name   | vCenter |
/// +--------+---------+
/// | web01  | dev-vc1 |
/// +--------+---------+
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
    padding: usize,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            align: vec![Align::default(); headers.len()],
            rows: Vec::new(),
            padding: 1,
        }
    }

    pub fn align(mut self, header: &str, align: Align) -> Self {
        if let Some(i) = self.headers.iter().position(|h| h == header) {
            self.align[i] = align;
        }
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Rows shorter than the header are padded with empty cells, longer ones cut.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = row.into_iter().map(|c| c.to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }

    fn write_border(&self, f: &mut Formatter, widths: &[usize]) -> fmt::Result {
        write!(f, "+")?;
        for w in widths {
            write!(f, "{}+", "-".repeat(w + 2 * self.padding))?;
        }
        writeln!(f)
    }

    fn write_line(&self, f: &mut Formatter, widths: &[usize], cells: &[String]) -> fmt::Result {
        let pad = " ".repeat(self.padding);
        write!(f, "|")?;
        for ((cell, &w), align) in cells.iter().zip(widths).zip(&self.align) {
            match align {
                Align::Left => write!(f, "{pad}{:<w$}{pad}|", cell)?,
                Align::Center => write!(f, "{pad}{:^w$}{pad}|", cell)?,
                Align::Right => write!(f, "{pad}{:>w$}{pad}|", cell)?,
            }
        }
        writeln!(f)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let widths = self.widths();
        self.write_border(f, &widths)?;
        self.write_line(f, &widths, &self.headers)?;
        self.write_border(f, &widths)?;
        for row in &self.rows {
            self.write_line(f, &widths, row)?;
        }
        self.write_border(f, &widths)
    }
}
