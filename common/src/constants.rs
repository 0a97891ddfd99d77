// Grid:
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 12;
pub const MAX_DIMENSION: usize = 256; // Per axis. The rendered grid is twice this plus one.

// Generation:
pub const PRIORITY_RANGE: u32 = 1000; // Frontier priorities are drawn from 0..PRIORITY_RANGE.

// Scheduling:
pub const DEFAULT_TICK_MILLIS: u64 = 1;
