/// One fixed-length window of the decoded audio track.
///
/// Spans are 0-indexed, contiguous, non-overlapping, and together cover
/// `[0, total_ms)` exactly. The last span may be shorter than the nominal
/// chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl ChunkSpan {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Divide a track of `total_ms` into `ceil(total_ms / chunk_ms)` spans of at
/// most `chunk_ms` each. A zero-length track yields no spans.
pub fn chunk_spans(total_ms: u64, chunk_ms: u64) -> Vec<ChunkSpan> {
    assert!(chunk_ms > 0, "chunk length must be positive");

    let mut spans = Vec::with_capacity(total_ms.div_ceil(chunk_ms) as usize);
    let mut start_ms = 0;
    let mut index = 0;
    while start_ms < total_ms {
        let end_ms = (start_ms + chunk_ms).min(total_ms);
        spans.push(ChunkSpan {
            index,
            start_ms,
            end_ms,
        });
        start_ms = end_ms;
        index += 1;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 30_000, 0)]
    #[case(1, 30_000, 1)]
    #[case(29_999, 30_000, 1)]
    #[case(30_000, 30_000, 1)]
    #[case(30_001, 30_000, 2)]
    #[case(60_000, 30_000, 2)]
    #[case(65_000, 30_000, 3)]
    #[case(90_001, 30_000, 4)]
    fn test_span_count_is_ceil(#[case] total: u64, #[case] chunk: u64, #[case] expected: usize) {
        assert_eq!(chunk_spans(total, chunk).len(), expected);
    }

    #[rstest]
    #[case(65_000, 30_000)]
    #[case(1, 30_000)]
    #[case(120_000, 30_000)]
    #[case(7, 3)]
    fn test_spans_partition_duration(#[case] total: u64, #[case] chunk: u64) {
        let spans = chunk_spans(total, chunk);
        let mut expected_start = 0;
        for (i, span) in spans.iter().enumerate() {
            assert_eq!(span.index, i);
            assert_eq!(span.start_ms, expected_start);
            assert!(span.end_ms > span.start_ms);
            assert!(span.duration_ms() <= chunk);
            expected_start = span.end_ms;
        }
        assert_eq!(expected_start, total);
    }

    #[test]
    fn test_65_second_track_has_expected_spans() {
        let spans = chunk_spans(65_000, 30_000);
        assert_eq!(
            spans,
            vec![
                ChunkSpan {
                    index: 0,
                    start_ms: 0,
                    end_ms: 30_000
                },
                ChunkSpan {
                    index: 1,
                    start_ms: 30_000,
                    end_ms: 60_000
                },
                ChunkSpan {
                    index: 2,
                    start_ms: 60_000,
                    end_ms: 65_000
                },
            ]
        );
    }

    #[test]
    fn test_zero_duration_yields_no_spans() {
        assert!(chunk_spans(0, 30_000).is_empty());
    }
}
