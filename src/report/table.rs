//! Statistics table widget, rendered off-screen to plain text

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Row, Table, Widget},
};

use crate::types::StatisticsReport;

const HEADERS: [&str; 4] = [
    "Язык программирования",
    "Вакансий найдено",
    "Вакансий обработано",
    "Средняя зарплата",
];

/// Gap between columns
const COLUMN_SPACING: u16 = 2;

/// One bordered table per source: title, header row, one row per category
pub struct StatisticsTable<'a> {
    title: &'a str,
    report: &'a StatisticsReport,
}

impl<'a> StatisticsTable<'a> {
    pub fn new(title: &'a str, report: &'a StatisticsReport) -> Self {
        Self { title, report }
    }

    fn rows(&self) -> Vec<[String; 4]> {
        self.report
            .entries()
            .iter()
            .map(|e| {
                [
                    e.category.clone(),
                    e.summary.found.to_string(),
                    e.summary.processed.to_string(),
                    e.summary.average_salary.to_string(),
                ]
            })
            .collect()
    }

    /// Width of each column: widest of header and cells
    fn column_widths(&self) -> [u16; 4] {
        let mut widths = HEADERS.map(display_width);
        for row in self.rows() {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(display_width(cell));
            }
        }
        widths
    }

    /// Area needed to show the whole table including borders
    pub fn size(&self) -> (u16, u16) {
        let widths = self.column_widths();
        let columns: u16 = widths.iter().sum::<u16>() + COLUMN_SPACING * (widths.len() as u16 - 1);
        let width = columns.max(display_width(self.title)) + 2;
        let height = self.report.len() as u16 + 1 + 2;
        (width, height)
    }

    /// Render into a buffer of exactly [`Self::size`] and return its lines
    pub fn render_to_string(&self) -> String {
        let (width, height) = self.size();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        StatisticsTable::new(self.title, self.report).render(area, &mut buf);
        buffer_to_string(&buf)
    }
}

impl Widget for StatisticsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let widths = self.column_widths().map(Constraint::Length);

        let header = Row::new(HEADERS.map(Cell::from))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self
            .rows()
            .into_iter()
            .map(|row| Row::new(row.map(Cell::from)));

        Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .block(Block::bordered().title(self.title))
            .render(area, buf);
    }
}

fn display_width(s: &str) -> u16 {
    Line::from(s).width() as u16
}

/// Flatten a buffer into newline-separated rows with trailing spaces trimmed
fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            // Wide graphemes occupy more than one cell
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buf[(x, y)].symbol();
            skip = display_width(symbol).saturating_sub(1) as usize;
            line.push_str(symbol);
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
