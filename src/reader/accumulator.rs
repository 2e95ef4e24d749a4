//! Record accumulation over a line cursor

use super::cursor::LineCursor;
use crate::error::Result;
use crate::separator::RecordSeparatorPolicy;

/// Builds one logical record per call from the lines of a [`LineCursor`]
pub struct RecordAccumulator<'a> {
    cursor: &'a mut LineCursor,
    policy: &'a mut dyn RecordSeparatorPolicy,
}

impl<'a> RecordAccumulator<'a> {
    /// Accumulate lines from `cursor` using `policy`
    pub fn new(cursor: &'a mut LineCursor, policy: &'a mut dyn RecordSeparatorPolicy) -> Self {
        Self { cursor, policy }
    }

    /// Next complete record, or `None` once the input is exhausted
    ///
    /// A record left incomplete by the end of the input is still returned.
    pub fn next_record(&mut self) -> Result<Option<String>> {
        let Some(mut record) = self.cursor.next_line()? else {
            return Ok(None);
        };

        while !self.policy.is_end_of_record(&record) {
            let Some(line) = self.cursor.next_line()? else {
                break;
            };
            let mut joined = self.policy.pre_process(&record);
            joined.push_str(&line);
            record = joined;
        }

        Ok(Some(self.policy.post_process(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separator::{SingleLinePolicy, SuffixPolicy};
    use crate::source::BytesSource;
    use crate::types::ValidationMode;

    /// Two lines per record
    #[derive(Default)]
    struct PairPolicy {
        pair: bool,
    }

    impl RecordSeparatorPolicy for PairPolicy {
        fn is_end_of_record(&mut self, _record: &str) -> bool {
            self.pair = !self.pair;
            !self.pair
        }
    }

    fn records(input: &str, policy: &mut dyn RecordSeparatorPolicy) -> Vec<String> {
        let source = BytesSource::from_text(input);
        let mut cursor = LineCursor::open(&source, ValidationMode::Strict).unwrap();
        let mut accumulator = RecordAccumulator::new(&mut cursor, policy);
        std::iter::from_fn(|| accumulator.next_record().unwrap()).collect()
    }

    #[test]
    fn test_single_line_records() {
        let result = records("testLine1\ntestLine2\ntestLine3", &mut SingleLinePolicy);
        assert_eq!(result, vec!["testLine1", "testLine2", "testLine3"]);
    }

    #[test]
    fn test_pair_records() {
        let result = records("l1\nl2\nl3\nl4", &mut PairPolicy::default());
        assert_eq!(result, vec!["l1l2", "l3l4"]);
    }

    #[test]
    fn test_partial_record_at_end_is_returned() {
        let result = records("l1\nl2\nl3", &mut PairPolicy::default());
        assert_eq!(result, vec!["l1l2", "l3"]);

        let result = records("a;\nb\nc", &mut SuffixPolicy::new());
        assert_eq!(result, vec!["a", "bc"]);
    }

    #[test]
    fn test_empty_input_has_no_records() {
        assert!(records("", &mut SingleLinePolicy).is_empty());
    }
}
