/// How the cursor recovers the line and column when it backtracks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineTracking {
  /// Store the line and column in each checkpoint, and restore them directly
  #[default]
  Incremental,
  /// Rescan the source from the start up to the checkpoint on every backtrack
  ///
  /// Matches the cost profile of older versions of the parser, for benchmarks.
  Rescan,
}

/// Settings for the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// The deepest forms can be nested before parsing fails
  pub max_depth: usize,
  /// How the line and column are recovered after backtracking
  pub line_tracking: LineTracking,
}
impl Default for Config {
  fn default() -> Self {
    Self {
      max_depth: 256,
      line_tracking: LineTracking::Incremental,
    }
  }
}
