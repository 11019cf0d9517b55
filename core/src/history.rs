use std::collections::VecDeque;

/// How many recent predictions are kept per user.
pub const HISTORY_LIMIT: usize = 3;

/// Bounded FIFO of one user's recent predictions, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<String>,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl HistoryLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Append at the tail, evicting from the head while over the limit.
    pub fn append(&mut self, entry: String) {
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest-to-newest. Empty is a normal state, not an error.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{HISTORY_LIMIT, HistoryLog};

    fn read(log: &HistoryLog) -> Vec<&str> {
        log.iter().collect()
    }

    #[test]
    fn empty_log_reads_as_empty_sequence() {
        let log = HistoryLog::default();
        assert!(log.is_empty());
        assert!(read(&log).is_empty());
    }

    #[test]
    fn keeps_insertion_order_under_the_limit() {
        let mut log = HistoryLog::default();
        log.append("a".into());
        log.append("b".into());
        assert_eq!(read(&log), ["a", "b"]);
    }

    #[test]
    fn evicts_oldest_beyond_the_limit() {
        let mut log = HistoryLog::default();
        for entry in ["one", "two", "three", "four"] {
            log.append(entry.into());
        }
        assert_eq!(read(&log), ["two", "three", "four"]);
        assert_eq!(read(&log).len(), HISTORY_LIMIT);
    }

    #[test]
    fn bound_holds_for_any_limit() {
        let mut log = HistoryLog::with_limit(1);
        log.append("a".into());
        log.append("b".into());
        assert_eq!(read(&log), ["b"]);

        let mut log = HistoryLog::with_limit(5);
        for i in 0..20 {
            log.append(i.to_string());
        }
        let entries: Vec<&str> = log.iter().collect();
        assert_eq!(entries, ["15", "16", "17", "18", "19"]);
    }
}
