use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use time::error::IndeterminateOffset;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::debug;

use super::ResponseTable;

/// Reply used when neither a keyword nor a `default` entry can answer.
pub const FALLBACK_REPLY: &str = "I don't understand.";

/// Picks canned replies for chat messages.
///
/// The table and the random source are supplied at construction, so a
/// seeded generator makes reply selection reproducible.
///
/// # Examples
///
/// ```
/// use prompt_chat::chat::{ResponseMatcher, ResponseTable};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let table = ResponseTable::new([("hello", ["Hi there!"])]);
/// let mut matcher = ResponseMatcher::with_rng(table, StdRng::seed_from_u64(7));
/// assert_eq!(matcher.respond("  HELLO bot "), "Hi there!");
/// ```
pub struct ResponseMatcher<R = StdRng> {
    table: ResponseTable,
    rng: R,
}

impl ResponseMatcher<StdRng> {
    /// Creates a matcher seeded from operating-system entropy.
    pub fn new(table: ResponseTable) -> Self {
        Self::with_rng(table, StdRng::from_entropy())
    }
}

impl<R: Rng> ResponseMatcher<R> {
    /// Creates a matcher drawing replies with `rng`.
    pub fn with_rng(table: ResponseTable, rng: R) -> Self {
        Self { table, rng }
    }

    /// Returns the response table.
    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Replies to `message` using the current local time.
    pub fn respond(&mut self, message: &str) -> String {
        self.respond_at(message, current_time())
    }

    /// Replies to `message` as if the current time were `now`.
    ///
    /// Messages mentioning "time" or "date" get the clock reading; otherwise
    /// the first table keyword contained in the message picks the reply list,
    /// falling back to the `default` entry and then [`FALLBACK_REPLY`].
    pub fn respond_at(&mut self, message: &str, now: OffsetDateTime) -> String {
        let message = message.trim().to_lowercase();

        if message.contains("time") {
            return format!("The current time is {}.", format_time(now));
        }
        if message.contains("date") {
            return format!("Today's date is {}.", format_date(now));
        }

        let matched = self
            .table
            .entries()
            .find(|(keyword, _)| message.contains(keyword));

        let replies = match matched {
            Some((keyword, replies)) => {
                debug!(keyword, "matched response keyword");
                Some(replies)
            }
            None => self.table.default_replies(),
        };

        replies
            .and_then(|replies| replies.choose(&mut self.rng))
            .cloned()
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Reads the local wall clock, falling back to UTC when the local offset is
/// unavailable.
fn current_time() -> OffsetDateTime {
    local_or_utc(OffsetDateTime::now_local())
}

fn local_or_utc(local: Result<OffsetDateTime, IndeterminateOffset>) -> OffsetDateTime {
    local.unwrap_or_else(|err| {
        debug!(error = %err, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    })
}

/// Formats a time as `HH:MM AM/PM`.
fn format_time(now: OffsetDateTime) -> String {
    now.format(format_description!("[hour repr:12]:[minute] [period]"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Formats a date as `Month DD, YYYY`.
fn format_date(now: OffsetDateTime) -> String {
    now.format(format_description!("[month repr:long] [day], [year]"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcOffset;
    use time::macros::datetime;

    fn matcher(table: ResponseTable) -> ResponseMatcher {
        ResponseMatcher::with_rng(table, StdRng::seed_from_u64(42))
    }

    #[test]
    fn time_reply_uses_twelve_hour_clock() {
        let mut m = matcher(ResponseTable::default());
        let reply = m.respond_at("What TIME is it?", datetime!(2026-10-18 15:07 UTC));
        assert_eq!(reply, "The current time is 03:07 PM.");
    }

    #[test]
    fn date_reply_spells_out_month() {
        let mut m = matcher(ResponseTable::default());
        let reply = m.respond_at("today's date please", datetime!(2026-03-05 09:00 UTC));
        assert_eq!(reply, "Today's date is March 05, 2026.");
    }

    #[test]
    fn time_takes_precedence_over_date_and_table() {
        let table = ResponseTable::new([("time", ["from the table"])]);
        let mut m = matcher(table);
        let reply = m.respond_at("time and date", datetime!(2026-10-18 00:30 UTC));
        assert_eq!(reply, "The current time is 12:30 AM.");
    }

    #[test]
    fn first_matching_keyword_in_table_order_wins() {
        let table = ResponseTable::new([
            ("exam", vec!["exam reply"]),
            ("study", vec!["study reply"]),
        ]);
        let mut m = matcher(table);
        assert_eq!(m.respond("I need to study for my exam"), "exam reply");
    }

    #[test]
    fn message_is_trimmed_and_case_folded() {
        let table = ResponseTable::new([("thank", ["You're welcome!"])]);
        let mut m = matcher(table);
        assert_eq!(m.respond("   THANKS a lot   "), "You're welcome!");
    }

    #[test]
    fn unmatched_message_uses_default_entry() {
        let table = ResponseTable::new([
            ("hello", vec!["Hi!"]),
            ("default", vec!["Say again?"]),
        ]);
        let mut m = matcher(table);
        assert_eq!(m.respond("quantum chromodynamics"), "Say again?");
    }

    #[test]
    fn missing_default_uses_hardcoded_fallback() {
        let table = ResponseTable::new([("hello", ["Hi!"])]);
        let mut m = matcher(table);
        assert_eq!(m.respond("nothing matches here"), FALLBACK_REPLY);
    }

    #[test]
    fn empty_reply_list_uses_hardcoded_fallback() {
        let table = ResponseTable::new([("hello", Vec::<String>::new())]);
        let mut m = matcher(table);
        assert_eq!(m.respond("hello"), FALLBACK_REPLY);
    }

    #[test]
    fn replies_come_from_the_matched_list() {
        let replies = ["one", "two", "three"];
        let table = ResponseTable::new([("hello", replies)]);
        let mut m = matcher(table);
        for _ in 0..20 {
            let reply = m.respond("hello");
            assert!(replies.contains(&reply.as_str()), "unexpected reply {reply}");
        }
    }

    #[test]
    fn same_seed_gives_same_replies() {
        let table = ResponseTable::new([("hello", ["a", "b", "c", "d"])]);
        let mut first = ResponseMatcher::with_rng(table.clone(), StdRng::seed_from_u64(9));
        let mut second = ResponseMatcher::with_rng(table, StdRng::seed_from_u64(9));
        for _ in 0..10 {
            assert_eq!(first.respond("hello"), second.respond("hello"));
        }
    }

    #[test]
    fn unknown_local_offset_falls_back_to_utc() {
        let now = local_or_utc(Err(IndeterminateOffset));
        assert_eq!(now.offset(), UtcOffset::UTC);

        let fixed = datetime!(2024-03-05 14:07 +02:00);
        assert_eq!(local_or_utc(Ok(fixed)), fixed);
    }
}
