//! Parallel decoding of large captures
//!
//! Lines are independent, so a capture is cut into contiguous chunks and
//! each chunk is decoded on its own scoped worker. Results come back in
//! input order.

use super::parser::{is_trace_candidate, TraceLineResult, TraceParser};

/// Below this many lines a single thread is faster than spawning workers
pub const MIN_PARALLEL_LINES: usize = 512;

/// Decode `text` on up to `workers` threads
///
/// Same output as [`TraceParser::parse_text`].
pub fn decode_parallel(parser: &TraceParser, text: &str, workers: usize) -> Vec<TraceLineResult> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| is_trace_candidate(line))
        .map(|(index, line)| (index + 1, line))
        .collect();

    let workers = workers.clamp(1, lines.len().max(1));
    if workers == 1 || lines.len() < MIN_PARALLEL_LINES {
        return decode_chunk(parser, &lines);
    }

    let chunk_size = lines.len().div_ceil(workers);
    tracing::debug!(lines = lines.len(), workers, chunk_size, "decoding capture in parallel");

    let outcome = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move |_| decode_chunk(parser, chunk)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<std::thread::Result<Vec<_>>>()
    });

    match outcome {
        Ok(Ok(chunks)) => chunks.into_iter().flatten().collect(),
        _ => {
            tracing::error!("decode worker panicked, retrying on the calling thread");
            decode_chunk(parser, &lines)
        }
    }
}

fn decode_chunk(parser: &TraceParser, lines: &[(usize, &str)]) -> Vec<TraceLineResult> {
    lines
        .iter()
        .map(|&(line_number, line)| parser.parse_numbered(line_number, line))
        .collect()
}
