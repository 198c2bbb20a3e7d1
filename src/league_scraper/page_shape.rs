use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::league_scraper::cell_text;

/// Role of one `<tr>` of the matches table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRow {
    /// Opens a new matchday; carries the header text ("Journée 01").
    MatchdayHeader(String),
    /// Candidate match row; carries the cell texts in column order.
    Match(Vec<String>),
    /// Anything else (column titles, spacers).
    Other,
}

/// Maps a results page onto the row sequences the parsers consume.
///
/// Implementations own every assumption about the page layout, so the parsers
/// never see HTML.
pub trait PageShape {
    /// Rows of the matches table, in document order.
    fn match_rows(&self, document: &Html) -> Result<Vec<PageRow>>;

    /// Cell texts of every data row of the standings table, in document order.
    fn standing_rows(&self, document: &Html) -> Result<Vec<Vec<String>>>;
}

/// The FFVB calendar page layout.
///
/// The matches table is picked by position among all tables; header and data rows
/// are recognised by their background attributes.
#[derive(Debug, Clone)]
pub struct CalendarPageShape {
    matches_table_index: usize,
    data_row_bgcolor: String,
    header_background: String,
    header_keyword: String,
    standings_marker: String,
}

impl CalendarPageShape {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            matches_table_index: config.matches_table_index,
            data_row_bgcolor: config.data_row_bgcolor.clone(),
            header_background: config.header_background.clone(),
            header_keyword: config.header_keyword.clone(),
            standings_marker: config.standings_marker.clone(),
        }
    }

    fn is_data_row(&self, row: &ElementRef) -> bool {
        row.value()
            .attr("bgcolor")
            .is_some_and(|c| c.eq_ignore_ascii_case(&self.data_row_bgcolor))
    }

    fn classify_row(&self, row: &ElementRef, cell_selector: &Selector) -> PageRow {
        let header_cell = row
            .select(cell_selector)
            .find(|td| td.value().attr("background") == Some(self.header_background.as_str()));

        if let Some(header) = header_cell {
            let text: String = header.text().collect();
            if text.contains(&self.header_keyword) {
                return PageRow::MatchdayHeader(cell_text(&header));
            }
        }

        if self.is_data_row(row) {
            PageRow::Match(row.select(cell_selector).map(|td| cell_text(&td)).collect())
        } else {
            PageRow::Other
        }
    }
}

impl PageShape for CalendarPageShape {
    fn match_rows(&self, document: &Html) -> Result<Vec<PageRow>> {
        let table_selector = Selector::parse("table")?;
        let row_selector = Selector::parse("tr")?;
        let cell_selector = Selector::parse("td")?;

        let Some(table) = document.select(&table_selector).nth(self.matches_table_index) else {
            warn!(
                index = self.matches_table_index,
                "matches table not found on page"
            );
            return Ok(vec![]);
        };

        let rows = table
            .select(&row_selector)
            .map(|row| self.classify_row(&row, &cell_selector))
            .collect_vec();
        debug!(rows = rows.len(), "collected matches table rows");
        Ok(rows)
    }

    fn standing_rows(&self, document: &Html) -> Result<Vec<Vec<String>>> {
        let table_selector = Selector::parse(r#"table[cellspacing="1"][cellpadding="2"]"#)?;
        let row_selector = Selector::parse("tr")?;
        let cell_selector = Selector::parse("td")?;

        for table in document.select(&table_selector) {
            let rows = table.select(&row_selector).collect_vec();
            let Some((header, body)) = rows.split_first() else {
                continue;
            };
            let is_standings = header
                .select(&cell_selector)
                .any(|td| td.text().collect::<String>().contains(&self.standings_marker));
            if !is_standings {
                continue;
            }

            debug!(rows = rows.len(), "found standings table");
            return Ok(body
                .iter()
                .filter(|row| self.is_data_row(row))
                .map(|row| row.select(&cell_selector).map(|td| cell_text(&td)).collect())
                .collect());
        }

        warn!("standings table not found on page");
        Ok(vec![])
    }
}
