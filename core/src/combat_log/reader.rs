use super::error::ReaderError;
use super::event::CombatEvent;
use super::parser::LogParser;
use chrono::NaiveDateTime;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::info;

// processing a full log file in one pass, used for catch-up before tailing
pub fn read_log_file<P: AsRef<Path>>(
    path: P,
    session_date: NaiveDateTime,
) -> Result<(Vec<CombatEvent>, u64), ReaderError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| ReaderError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mmap = unsafe {
        Mmap::map(&file).map_err(|source| ReaderError::MemoryMap {
            path: path.to_path_buf(),
            source,
        })?
    };
    let bytes = mmap.as_ref();
    let end_pos = bytes.len() as u64;

    // Find all line boundaries
    let mut line_ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        if end > start {
            line_ranges.push((start, end));
        }
        start = end + 1;
    }
    if start < bytes.len() {
        line_ranges.push((start, bytes.len()));
    }

    let parser = LogParser::new(session_date);
    let events: Vec<CombatEvent> = line_ranges
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &(start, end))| {
            let line = String::from_utf8_lossy(&bytes[start..end]);
            parser.parse_line(idx as u64 + 1, &line)
        })
        .collect();

    Ok((events, end_pos))
}

/// Tails a live log file, one complete line per poll.
///
/// This is the event source adapter: each [`poll`](LogTail::poll) consumes
/// at most one line and yields either a parsed event or `None`. `None` is a
/// first-class result, it is how time-based statistics learn that a tick
/// passed with no new data. Sleeping between polls belongs to the caller.
pub struct LogTail {
    path: PathBuf,
    reader: BufReader<File>,
    parser: LogParser,
    line_number: u64,
    buf: Vec<u8>,
}

impl LogTail {
    /// Open a log file and start tailing from its current end.
    pub async fn from_end<P: AsRef<Path>>(
        path: P,
        session_date: NaiveDateTime,
    ) -> Result<Self, ReaderError> {
        let mut tail = Self::open(path, session_date).await?;
        let pos = tail
            .reader
            .seek(SeekFrom::End(0))
            .await
            .map_err(|source| ReaderError::Seek {
                path: tail.path.clone(),
                source,
            })?;
        info!(path = %tail.path.display(), offset = pos, "tailing log file");
        Ok(tail)
    }

    /// Open a log file and start tailing from a known byte offset.
    pub async fn from_offset<P: AsRef<Path>>(
        path: P,
        session_date: NaiveDateTime,
        offset: u64,
    ) -> Result<Self, ReaderError> {
        let mut tail = Self::open(path, session_date).await?;
        tail.reader
            .seek(SeekFrom::Start(offset))
            .await
            .map_err(|source| ReaderError::Seek {
                path: tail.path.clone(),
                source,
            })?;
        info!(path = %tail.path.display(), offset, "tailing log file");
        Ok(tail)
    }

    async fn open<P: AsRef<Path>>(
        path: P,
        session_date: NaiveDateTime,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|source| ReaderError::OpenFile {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            reader: BufReader::new(file),
            parser: LogParser::new(session_date),
            line_number: 0,
            buf: Vec::new(),
        })
    }

    /// Consume at most one complete line and return its event, if any.
    ///
    /// Returns `Ok(None)` when no complete line is available this tick or
    /// when the line does not parse. A trailing partial line is kept in the
    /// buffer until the writer finishes it.
    pub async fn poll(&mut self) -> Result<Option<CombatEvent>, ReaderError> {
        match self.reader.read_until(b'\n', &mut self.buf).await {
            Ok(0) => Ok(None),
            Ok(_) => {
                // Only process complete lines; partial data stays buffered
                // and the next read appends to it
                if self.buf.ends_with(b"\n") {
                    self.line_number += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    let event = self.parser.parse_line(self.line_number, line.trim_end());
                    self.buf.clear();
                    Ok(event)
                } else {
                    Ok(None)
                }
            }
            Err(source) => Err(ReaderError::ReadFile {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn session_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_read_log_file_parses_all_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[10:00:00.000] [A] [B] [Slash] (100)").unwrap();
        writeln!(file, "garbage line").unwrap();
        writeln!(file, "[10:00:01.000] [A] [B] [Slash] (50)").unwrap();
        file.flush().unwrap();

        let (events, end_pos) = read_log_file(file.path(), session_date()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].amount, 100);
        assert_eq!(events[1].amount, 50);
        assert_eq!(end_pos, file.as_file().metadata().unwrap().len());
    }

    #[tokio::test]
    async fn test_poll_reads_one_line_per_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[10:00:00.000] [A] [B] [Slash] (100)").unwrap();
        writeln!(file, "[10:00:01.000] [A] [B] [Slash] (50)").unwrap();
        file.flush().unwrap();

        let mut tail = LogTail::from_offset(file.path(), session_date(), 0)
            .await
            .unwrap();

        let first = tail.poll().await.unwrap().unwrap();
        assert_eq!(first.amount, 100);
        let second = tail.poll().await.unwrap().unwrap();
        assert_eq!(second.amount, 50);
        assert!(tail.poll().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_poll_keeps_partial_line_buffered() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[10:00:00.000] [A] [B] ").unwrap();
        file.flush().unwrap();

        let mut tail = LogTail::from_offset(file.path(), session_date(), 0)
            .await
            .unwrap();
        assert!(tail.poll().await.unwrap().is_none());

        writeln!(file, "[Slash] (100)").unwrap();
        file.flush().unwrap();

        let event = tail.poll().await.unwrap().unwrap();
        assert_eq!(event.amount, 100);
        assert_eq!(event.line_number, 1);
    }

    #[tokio::test]
    async fn test_from_end_skips_existing_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[10:00:00.000] [A] [B] [Slash] (100)").unwrap();
        file.flush().unwrap();

        let mut tail = LogTail::from_end(file.path(), session_date()).await.unwrap();
        assert!(tail.poll().await.unwrap().is_none());

        writeln!(file, "[10:00:05.000] [A] [B] [Slash] (75)").unwrap();
        file.flush().unwrap();

        let event = tail.poll().await.unwrap().unwrap();
        assert_eq!(event.amount, 75);
    }

    #[tokio::test]
    async fn test_poll_skips_unparsable_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not combat data").unwrap();
        writeln!(file, "[10:00:00.000] [A] [B] [Slash] (100)").unwrap();
        file.flush().unwrap();

        let mut tail = LogTail::from_offset(file.path(), session_date(), 0)
            .await
            .unwrap();
        assert!(tail.poll().await.unwrap().is_none());
        assert_eq!(tail.poll().await.unwrap().unwrap().amount, 100);
    }
}
