use crate::tail::tail_buffer::TailBuffer;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};

pub mod tail_buffer;

/// Outcome of one pass over a log stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TailExtract {
    /// The last `capacity` lines, in original relative order.
    pub lines: Vec<String>,

    /// Every line the stream contained, retained or not.
    pub total_lines: u64,

    pub bytes_read: u64,
}

/// # read tail lines
///
/// Consume a byte stream incrementally and retain only the most recent
/// `capacity` lines. The stream is never materialized as a whole; memory is
/// bounded by the capacity plus one pending line fragment.
///
/// Lines are `\n`-delimited. One trailing `\r` per line is stripped. A final
/// unterminated fragment counts as a line. Content is treated as opaque
/// newline-delimited text; invalid UTF-8 is replaced lossily.
///
/// ### Arguments
///
/// * `stream`: incremental byte chunks, ending on `None`.
/// * `capacity`: max lines to retain. 0 is valid and retains nothing while
///   still counting every line.
pub async fn read_tail_lines<S, E>(stream: S, capacity: usize) -> Result<TailExtract, E>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    futures_util::pin_mut!(stream);

    let mut buffer: TailBuffer<String> = TailBuffer::new(capacity);
    let mut pending: Vec<u8> = Vec::new();
    let mut bytes_read: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        bytes_read += chunk.len() as u64;

        let mut rest: &[u8] = &chunk;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            pending.extend_from_slice(&rest[..pos]);
            buffer.push(take_pending_line(&mut pending));
            rest = &rest[pos + 1..];
        }
        pending.extend_from_slice(rest);
    }

    if !pending.is_empty() {
        buffer.push(take_pending_line(&mut pending));
    }

    Ok(TailExtract {
        total_lines: buffer.total_seen(),
        lines: buffer.into_entries(),
        bytes_read,
    })
}

fn take_pending_line(pending: &mut Vec<u8>) -> String {
    if pending.last() == Some(&b'\r') {
        pending.pop();
    }

    let line = String::from_utf8_lossy(pending).into_owned();
    pending.clear();
    line
}

/// # truncate to window
///
/// Narrow retained lines down to the caller's requested window, dropping
/// from the front, and join with newline.
///
/// The extractor capacity is already `min(tail_lines, ceiling)`, so this is
/// a no-op unless the ceiling clamped the capacity below `tail_lines` — in
/// that case the output silently carries fewer lines than requested.
pub fn truncate_to_window(lines: &[String], tail_lines: usize) -> String {
    let skip = lines.len().saturating_sub(tail_lines);
    lines[skip..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::convert::Infallible;

    fn chunked(chunks: Vec<&str>) -> impl Stream<Item = Result<Bytes, Infallible>> {
        stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    fn numbered_lines(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
        range.map(|i| format!("L{}", i)).collect()
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let extract = read_tail_lines(chunked(vec![]), 10).await.unwrap();

        assert!(extract.lines.is_empty());
        assert_eq!(extract.total_lines, 0);
        assert_eq!(extract.bytes_read, 0);
    }

    #[tokio::test]
    async fn test_keeps_last_lines_in_order() {
        let body = (1..=10).map(|i| format!("L{}\n", i)).collect::<String>();
        let extract = read_tail_lines(chunked(vec![body.as_str()]), 3).await.unwrap();

        assert_eq!(extract.lines, numbered_lines(8..=10));
        assert_eq!(extract.total_lines, 10);
        assert_eq!(extract.bytes_read, body.len() as u64);
    }

    #[tokio::test]
    async fn test_lines_split_across_chunk_boundaries() {
        let extract = read_tail_lines(
            chunked(vec!["first l", "ine\nsecond", " line\nthi", "rd line"]),
            10,
        )
        .await
        .unwrap();

        assert_eq!(
            extract.lines,
            vec!["first line", "second line", "third line"]
        );
        assert_eq!(extract.total_lines, 3);
    }

    #[tokio::test]
    async fn test_trailing_fragment_counts_as_line() {
        let extract = read_tail_lines(chunked(vec!["one\ntwo"]), 10).await.unwrap();

        assert_eq!(extract.lines, vec!["one", "two"]);
        assert_eq!(extract.total_lines, 2);
    }

    #[tokio::test]
    async fn test_trailing_newline_adds_no_empty_line() {
        let extract = read_tail_lines(chunked(vec!["one\ntwo\n"]), 10)
            .await
            .unwrap();

        assert_eq!(extract.lines, vec!["one", "two"]);
        assert_eq!(extract.total_lines, 2);
    }

    #[tokio::test]
    async fn test_crlf_is_stripped() {
        let extract = read_tail_lines(chunked(vec!["one\r\ntwo\r\nthree\r"]), 10)
            .await
            .unwrap();

        assert_eq!(extract.lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_counts_all_lines() {
        let extract = read_tail_lines(chunked(vec!["a\nb\nc\n"]), 0).await.unwrap();

        assert!(extract.lines.is_empty());
        assert_eq!(extract.total_lines, 3);
    }

    #[tokio::test]
    async fn test_repeated_extraction_is_identical() {
        let chunks = vec!["alpha\nbe", "ta\ngam", "ma\n"];

        let first = read_tail_lines(chunked(chunks.clone()), 2).await.unwrap();
        let second = read_tail_lines(chunked(chunks), 2).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(truncate_to_window(&first.lines, 2), "beta\ngamma");
    }

    #[tokio::test]
    async fn test_ceiling_clamped_capacity() {
        // 1000 lines, tail 500, ceiling 100: capacity is min(500, 100).
        let body = (1..=1000).map(|i| format!("L{}\n", i)).collect::<String>();
        let extract = read_tail_lines(chunked(vec![body.as_str()]), 100)
            .await
            .unwrap();

        assert_eq!(extract.lines, numbered_lines(901..=1000));
        assert_eq!(extract.total_lines, 1000);
        assert_eq!(
            truncate_to_window(&extract.lines, 500),
            numbered_lines(901..=1000).join("\n")
        );
    }

    #[test]
    fn test_truncate_drops_from_front() {
        let lines = numbered_lines(1..=5);

        assert_eq!(truncate_to_window(&lines, 2), "L4\nL5");
        assert_eq!(truncate_to_window(&lines, 5), lines.join("\n"));
        assert_eq!(truncate_to_window(&lines, 9), lines.join("\n"));
        assert_eq!(truncate_to_window(&lines, 0), "");
        assert_eq!(truncate_to_window(&[], 3), "");
    }
}
