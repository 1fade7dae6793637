use super::error::ParseError;
use super::event::CombatEvent;
use chrono::{Days, NaiveDateTime};
use memchr::{memchr, memchr_iter};
use tracing::trace;


/// Parses one log line into a [`CombatEvent`].
///
/// Line grammar, one hit per line:
///
/// ```text
/// [HH:MM:SS.mmm] [Source] [Target] [Ability] (amount)
/// ```
///
/// The parser carries the session start date so time-of-day stamps can be
/// promoted to full timestamps, rolling over midnight when a stamp reads
/// earlier than the session start.
pub struct LogParser {
    session_date: NaiveDateTime,
}

impl LogParser {
    pub fn new(session_date: NaiveDateTime) -> Self {
        Self { session_date }
    }

    /// Parse a line, discarding anything malformed.
    ///
    /// A line that does not match the grammar never becomes an event; the
    /// statistics core only ever sees well-formed input.
    pub fn parse_line(&self, line_number: u64, line: &str) -> Option<CombatEvent> {
        match self.try_parse_line(line_number, line) {
            Ok(event) => Some(event),
            Err(err) => {
                trace!(%err, "discarding unparsable line");
                None
            }
        }
    }

    /// Parse a line, reporting why it was rejected.
    pub fn try_parse_line(&self, line_number: u64, line: &str) -> Result<CombatEvent, ParseError> {
        let b = line.as_bytes();
        let brackets: Vec<usize> = memchr_iter(b'[', b).collect();
        let end_brackets: Vec<usize> = memchr_iter(b']', b).collect();

        // guard against invalid lines, throw away lines w/ != 4 bracket
        // delimited segments
        if brackets.len() != 4 || end_brackets.len() != 4 {
            return Err(ParseError::InvalidLineFormat { line_number });
        }

        let time_segment = &line[brackets[0] + 1..end_brackets[0]];
        let source_segment = &line[brackets[1] + 1..end_brackets[1]];
        let target_segment = &line[brackets[2] + 1..end_brackets[2]];
        let ability_segment = &line[brackets[3] + 1..end_brackets[3]];
        let amount_segment = &line[end_brackets[3] + 1..];

        let timestamp =
            self.parse_timestamp(time_segment)
                .ok_or_else(|| ParseError::InvalidTimestamp {
                    line_number,
                    segment: time_segment.to_string(),
                })?;

        if source_segment.is_empty() || target_segment.is_empty() || ability_segment.is_empty() {
            return Err(ParseError::EmptySegment { line_number });
        }

        let amount = Self::parse_amount(line_number, amount_segment)?;

        Ok(CombatEvent {
            line_number,
            timestamp,
            source: source_segment.to_string(),
            target: target_segment.to_string(),
            ability: ability_segment.to_string(),
            amount,
        })
    }

    // parse HH:MM:SS.mmm
    fn parse_timestamp(&self, segment: &str) -> Option<NaiveDateTime> {
        let b = segment.as_bytes();
        if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b'.' {
            return None;
        }
        if !b.iter().enumerate().all(|(i, c)| {
            matches!(i, 2 | 5 | 8) || c.is_ascii_digit()
        }) {
            return None;
        }

        let hour = (b[0] - b'0') * 10 + (b[1] - b'0');
        let minute = (b[3] - b'0') * 10 + (b[4] - b'0');
        let second = (b[6] - b'0') * 10 + (b[7] - b'0');
        let millis =
            (b[9] - b'0') as u16 * 100 + (b[10] - b'0') as u16 * 10 + (b[11] - b'0') as u16;

        let time = chrono::NaiveTime::from_hms_milli_opt(
            hour as u32,
            minute as u32,
            second as u32,
            millis as u32,
        )?;

        // time-of-day earlier than session start means the log rolled past
        // midnight
        if time
            .signed_duration_since(self.session_date.time())
            .num_milliseconds()
            < 0
        {
            self.session_date
                .date()
                .and_time(time)
                .checked_add_days(Days::new(1))
        } else {
            Some(self.session_date.date().and_time(time))
        }
    }

    // parse trailing " (1234)"
    fn parse_amount(line_number: u64, segment: &str) -> Result<i64, ParseError> {
        let b = segment.as_bytes();
        let open = memchr(b'(', b).ok_or_else(|| ParseError::InvalidAmount {
            line_number,
            detail: "missing opening parenthesis".to_string(),
        })?;
        let close = memchr(b')', b).ok_or_else(|| ParseError::InvalidAmount {
            line_number,
            detail: "missing closing parenthesis".to_string(),
        })?;
        if close <= open {
            return Err(ParseError::InvalidAmount {
                line_number,
                detail: segment.to_string(),
            });
        }

        let digits = &segment[open + 1..close];
        let amount = digits
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidAmount {
                line_number,
                detail: digits.to_string(),
            })?;
        if amount < 0 {
            return Err(ParseError::InvalidAmount {
                line_number,
                detail: digits.to_string(),
            });
        }
        Ok(amount)
    }
}
