// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batched record streaming
//!
//! Iterator-based event stream over the DATA section, for hosts that want
//! to yield control between fixed-size batches of records. This is pure
//! time-slicing: the record sequence is identical to [`RecordScanner`]'s,
//! and level grouping downstream still sees one logically global stream.

use crate::scanner::{RecordScanner, ScannedRecord};

/// Streaming configuration
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Number of records between progress events
    pub batch_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

/// Events emitted by [`parse_stream`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent<'a> {
    /// One scanned data record, in file order
    Record(ScannedRecord<'a>),
    /// Periodic progress marker, once per batch
    Progress {
        records_seen: usize,
        percent: f32,
    },
    /// End of the DATA section
    Done {
        total_records: usize,
    },
}

/// Stream records in batches with progress reporting.
pub fn parse_stream(content: &str, config: StreamConfig) -> StreamParser<'_> {
    // +1: a trailing line without '\n' still counts
    let total_lines = memchr::memchr_iter(b'\n', content.as_bytes()).count() + 1;
    StreamParser {
        scanner: RecordScanner::new(content),
        config,
        total_lines,
        records_seen: 0,
        queued_progress: None,
        finished: false,
    }
}

/// Iterator over [`ParseEvent`]s. Created by [`parse_stream`].
pub struct StreamParser<'a> {
    scanner: RecordScanner<'a>,
    config: StreamConfig,
    total_lines: usize,
    records_seen: usize,
    queued_progress: Option<ParseEvent<'a>>,
    finished: bool,
}

impl<'a> Iterator for StreamParser<'a> {
    type Item = ParseEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.queued_progress.take() {
            return Some(event);
        }
        if self.finished {
            return None;
        }
        match self.scanner.next() {
            Some(record) => {
                self.records_seen += 1;
                let batch = self.config.batch_size.max(1);
                if self.records_seen % batch == 0 {
                    let percent =
                        (record.line_index + 1) as f32 / self.total_lines as f32 * 100.0;
                    self.queued_progress = Some(ParseEvent::Progress {
                        records_seen: self.records_seen,
                        percent,
                    });
                }
                Some(ParseEvent::Record(record))
            }
            None => {
                self.finished = true;
                Some(ParseEvent::Done {
                    total_records: self.records_seen,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "\
DATA;
#1 = line_feature('1','1','1','1','0','1','0','1')
#2 = line_feature('1','1','1','1','0','2','0','2')
#3 = line_feature('1','1','1','1','0','3','0','3')
ENDSEC;
";

    #[test]
    fn test_stream_matches_scanner() {
        let scanned: Vec<_> = RecordScanner::new(CONTENT).collect();
        let streamed: Vec<_> = parse_stream(CONTENT, StreamConfig::default())
            .filter_map(|ev| match ev {
                ParseEvent::Record(rec) => Some(rec),
                _ => None,
            })
            .collect();
        assert_eq!(scanned, streamed);
    }

    #[test]
    fn test_progress_batches() {
        let events: Vec<_> = parse_stream(CONTENT, StreamConfig { batch_size: 2 }).collect();
        let progress: Vec<_> = events
            .iter()
            .filter(|ev| matches!(ev, ParseEvent::Progress { .. }))
            .collect();
        assert_eq!(progress.len(), 1);
        match progress[0] {
            ParseEvent::Progress { records_seen, percent } => {
                assert_eq!(*records_seen, 2);
                assert!(*percent > 0.0 && *percent <= 100.0);
            }
            _ => unreachable!(),
        }
        assert_eq!(
            events.last(),
            Some(&ParseEvent::Done { total_records: 3 })
        );
    }

    #[test]
    fn test_done_on_empty() {
        let events: Vec<_> = parse_stream("no data here", StreamConfig::default()).collect();
        assert_eq!(events, vec![ParseEvent::Done { total_records: 0 }]);
    }
}
