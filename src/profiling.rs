//! Named-block timing, ported from
//! `examples/original_source/source/profiling.cpp`'s `time_block`/
//! `end_time_block`/`dump_profile_info`, using a stack of open block names
//! and a map from name to accumulated total time and hit count.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};

struct TimeBlock {
    total: Duration,
    count: u64,
}

/// Accumulates named timing samples across a run and can dump them to a
/// report file at shutdown, mirroring the original's global profiler.
pub struct Profiler {
    blocks: HashMap<String, TimeBlock>,
    stack: Vec<(String, Instant)>,
}

impl Profiler {
    pub fn new() -> Profiler {
        Profiler {
            blocks: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Begins timing a named block; must be paired with `end_block`.
    pub fn begin_block(&mut self, name: &str) {
        self.stack.push((name.to_string(), Instant::now()));
    }

    /// Ends the most recently begun block, which must match `name`.
    ///
    /// # Panics
    /// Panics if no block is open, or if the open block's name doesn't
    /// match `name` (blocks must nest like parentheses, as in the original).
    pub fn end_block(&mut self, name: &str) {
        let (started_name, started_at) = self.stack.pop().expect("end_block called with no open block");
        assert_eq!(started_name, name, "time block mismatch: expected to end {:?}, found {:?}", name, started_name);

        let elapsed = started_at.elapsed();
        let entry = self.blocks.entry(started_name).or_insert(TimeBlock { total: Duration::ZERO, count: 0 });
        entry.total += elapsed;
        entry.count += 1;
    }

    /// Writes each block's name and average time to `profile.txt`, in the
    /// same "name, then average" shape as `dump_profile_info`.
    pub fn dump_profile_info(&self, path: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        for (name, block) in &self.blocks {
            let average = if block.count > 0 { block.total / block.count as u32 } else { Duration::ZERO };
            writeln!(file, "{}\naverage time: {:?}\n", name, average)?;
        }
        Ok(())
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Profiler::new()
    }
}

/// Scoped RAII guard that times a block for the duration of its lifetime,
/// an idiomatic alternative to the original's explicit begin/end pairing
/// for callers who don't need to cross an await point or an early return.
pub struct ScopedBlock<'a> {
    profiler: &'a mut Profiler,
    name: String,
}

impl<'a> ScopedBlock<'a> {
    pub fn new(profiler: &'a mut Profiler, name: &str) -> ScopedBlock<'a> {
        profiler.begin_block(name);
        ScopedBlock { profiler, name: name.to_string() }
    }
}

impl<'a> Drop for ScopedBlock<'a> {
    fn drop(&mut self) {
        self.profiler.end_block(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_total_and_count_across_repeated_blocks() {
        let mut profiler = Profiler::new();
        for _ in 0..3 {
            profiler.begin_block("frame");
            profiler.end_block("frame");
        }
        let block = profiler.blocks.get("frame").unwrap();
        assert_eq!(block.count, 3);
    }

    #[test]
    fn scoped_block_ends_on_drop() {
        let mut profiler = Profiler::new();
        {
            let _scope = ScopedBlock::new(&mut profiler, "scoped");
        }
        assert!(profiler.stack.is_empty());
        assert_eq!(profiler.blocks.get("scoped").unwrap().count, 1);
    }

    #[test]
    #[should_panic]
    fn mismatched_end_block_panics() {
        let mut profiler = Profiler::new();
        profiler.begin_block("a");
        profiler.end_block("b");
    }
}
