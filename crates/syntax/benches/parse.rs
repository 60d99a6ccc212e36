#![feature(test)]
#![feature(decl_macro)]

extern crate test;

use ark_syntax::{Config, LineTracking};
use test::{Bencher, black_box};

macro example_benchmark($name:ident) {
  mod $name {
    use super::*;

    const SOURCE: &str = include_str!(concat!("../../../demos/", stringify!($name), ".ark"));

    #[bench]
    fn parse(b: &mut Bencher) {
      b.iter(|| {
        let program = ark_syntax::parse(black_box(SOURCE)).unwrap();
        (program.node_count(), program.backtrack_count())
      });
    }

    #[bench]
    fn parse_rescan(b: &mut Bencher) {
      let config = Config {
        line_tracking: LineTracking::Rescan,
        ..Config::default()
      };

      b.iter(|| {
        let program = ark_syntax::parse_with_config(black_box(SOURCE), &config).unwrap();
        (program.node_count(), program.backtrack_count())
      });
    }
  }
}

example_benchmark!(simple);
example_benchmark!(medium);
example_benchmark!(big);
