use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing_subscriber::fmt::MakeWriter;
use volley_scraper::league_scraper::{parse_standings, scrape_document, CalendarPageShape, Html};
use volley_scraper::ScrapeConfig;

/// Collects everything the subscriber writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-10-19T07:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn test_skipped_standing_row_is_logged() {
    let mut cells: Vec<String> = (0..19).map(|i| i.to_string()).collect();
    cells[1] = "CAMBRAI 1".to_string();
    cells[18] = "n/a".to_string();

    let logs = capture(|| {
        assert!(parse_standings(&[cells], now()).is_empty());
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("skipping unparsable standing row"));
    assert!(logs.contains("failed to parse float"));
}

#[test]
fn test_missing_tables_are_logged() {
    let logs = capture(|| {
        let document = Html::parse_document("<p>Maintenance</p>");
        let config = ScrapeConfig::default();
        scrape_document(&document, &CalendarPageShape::new(&config), &config, now()).unwrap();
    });

    assert!(logs.contains("standings table not found on page"));
    assert!(logs.contains("matches table not found on page"));
    assert!(logs.contains("parsed matchdays and matches"));
}
