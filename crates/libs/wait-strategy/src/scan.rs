use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads `stream` to the end and counts the occurrences of `pattern` in it.
///
/// Counting works on raw bytes, so the line terminators used by the producer
/// (`\n`, `\r\n` or `\r`) make no difference, and a pattern split across two
/// reads is still found.
pub async fn scan<R>(mut stream: R, pattern: &[u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut content = Vec::new();
    stream.read_to_end(&mut content).await?;
    Ok(count_occurrences(&content, pattern))
}

/// Non-overlapping, left to right count of `needle` in `haystack`.
///
/// An empty needle never matches.
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut rest = haystack;
    while let Some(pos) = rest.windows(needle.len()).position(|window| window == needle) {
        count += 1;
        rest = &rest[pos + needle.len()..];
    }
    count
}
