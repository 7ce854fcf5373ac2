//! Summarize a chrome trace written by a `--features profile` run.
//!
//! Usage: `summarize-trace trace-XXXX.json [top]`
//!
//! Handles both complete events (`"ph": "X"` with `dur`) and begin/end
//! pairs (`"B"` / `"E"`, matched per thread). A truncated file (the app was
//! killed before the closing `]`) is accepted.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_TOP: usize = 20;

#[derive(Debug, Deserialize)]
struct TraceEvent {
    #[serde(default)]
    name: String,
    ph: String,
    /// Microseconds.
    #[serde(default)]
    ts: f64,
    #[serde(default)]
    dur: Option<f64>,
    #[serde(default)]
    tid: u64,
}

#[derive(Default, Debug, Clone, Copy)]
struct SpanStats {
    count: u64,
    total_us: f64,
    max_us: f64,
}

impl SpanStats {
    fn record(&mut self, dur_us: f64) {
        self.count += 1;
        self.total_us += dur_us;
        self.max_us = self.max_us.max(dur_us);
    }
}

fn parse_events(raw: &str) -> Result<Vec<TraceEvent>, serde_json::Error> {
    match serde_json::from_str(raw) {
        Ok(events) => Ok(events),
        Err(first) => {
            let trimmed = raw.trim_end().trim_end_matches(',');
            serde_json::from_str(&format!("{trimmed}]")).map_err(|_| first)
        }
    }
}

fn summarize(events: &[TraceEvent]) -> HashMap<&str, SpanStats> {
    let mut stats: HashMap<&str, SpanStats> = HashMap::new();
    let mut open: HashMap<u64, Vec<(&str, f64)>> = HashMap::new();

    for ev in events {
        match ev.ph.as_str() {
            "X" => {
                if let Some(dur) = ev.dur {
                    stats.entry(ev.name.as_str()).or_default().record(dur);
                }
            }
            "B" => open.entry(ev.tid).or_default().push((ev.name.as_str(), ev.ts)),
            "E" => {
                if let Some((name, start)) = open.get_mut(&ev.tid).and_then(Vec::pop) {
                    stats.entry(name).or_default().record(ev.ts - start);
                }
            }
            _ => {}
        }
    }
    stats
}

fn main() {
    verlet_sandbox::init_tracing("info");

    let Some(path) = std::env::args().nth(1) else {
        error!("usage: summarize-trace <trace.json> [top]");
        std::process::exit(2);
    };
    let top = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TOP);

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            error!(%path, %err, "cannot read trace");
            std::process::exit(1);
        }
    };
    let events = match parse_events(&raw) {
        Ok(events) => events,
        Err(err) => {
            error!(%path, %err, "not a chrome trace");
            std::process::exit(1);
        }
    };

    let stats = summarize(&events);
    let mut rows: Vec<_> = stats.into_iter().collect();
    rows.sort_by(|a, b| b.1.total_us.total_cmp(&a.1.total_us));

    info!(events = events.len(), spans = rows.len(), "trace loaded");
    println!("{:<48} {:>8} {:>12} {:>10} {:>10}", "span", "count", "total ms", "mean us", "max us");
    for (name, s) in rows.into_iter().take(top) {
        println!(
            "{:<48} {:>8} {:>12.3} {:>10.1} {:>10.1}",
            name,
            s.count,
            s.total_us / 1e3,
            s.total_us / s.count as f64,
            s.max_us
        );
    }
}
