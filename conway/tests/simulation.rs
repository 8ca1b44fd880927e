use conway::{
    Axis, Frame, GolError, NullRenderer, Renderer, RunConfig, RunSummary, Simulation, patterns,
};
use proptest::prelude::*;

fn config(rows: usize, cols: usize, rounds: u32, workers: usize, axis: Axis) -> RunConfig {
    RunConfig { rows, cols, rounds, workers, axis, print_partition: false }
}

fn play(rows: usize, cols: usize, rounds: u32, workers: usize, axis: Axis, alive: &[(usize, usize)]) -> RunSummary {
    Simulation::new(config(rows, cols, rounds, workers, axis), alive)
        .unwrap()
        .run(&mut NullRenderer)
        .unwrap()
}

/// Keeps every frame it is shown.
#[derive(Default)]
struct Recorder {
    frames: Vec<(u32, i64, Vec<(usize, usize)>)>,
    partition: Vec<conway::Region>,
}

impl Renderer for Recorder {
    fn report_partition(&mut self, regions: &[conway::Region]) -> conway::Result<()> {
        self.partition = regions.to_vec();
        Ok(())
    }

    fn render(&mut self, frame: &Frame<'_>) -> conway::Result<()> {
        let board = frame.snapshot();
        self.frames.push((frame.round(), frame.live_cells(), board.alive_cells()));
        Ok(())
    }
}

const HORIZONTAL: [(usize, usize); 3] = [(1, 1), (1, 2), (1, 3)];
const VERTICAL: [(usize, usize); 3] = [(0, 2), (1, 2), (2, 2)];

#[test]
fn blinker_has_period_two() {
    for workers in 1..=5 {
        for axis in [Axis::Row, Axis::Col] {
            let mut recorder = Recorder::default();
            Simulation::new(config(5, 5, 4, workers, axis), &HORIZONTAL)
                .unwrap()
                .run(&mut recorder)
                .unwrap();

            let rounds: Vec<_> = recorder.frames.iter().map(|f| f.0).collect();
            assert_eq!(rounds, vec![0, 1, 2, 3, 4]);
            for (round, live, cells) in &recorder.frames {
                assert_eq!(*live, 3);
                let expected = if round % 2 == 0 { &HORIZONTAL[..] } else { &VERTICAL[..] };
                assert_eq!(cells, expected, "round {round}, {workers} workers, {axis} axis");
            }
        }
    }
}

#[test]
fn block_is_a_still_life() {
    let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
    for (rows, cols) in [(4, 4), (6, 9), (10, 5)] {
        let summary = play(rows, cols, 25, 2, Axis::Row, &block);
        assert_eq!(summary.live_cells, 4);
        assert_eq!(summary.board.alive_cells(), block.to_vec());
    }
}

#[test]
fn isolated_cell_dies_and_stays_dead() {
    let mut recorder = Recorder::default();
    Simulation::new(config(6, 6, 3, 3, Axis::Col), &[(2, 3)])
        .unwrap()
        .run(&mut recorder)
        .unwrap();
    let live: Vec<_> = recorder.frames.iter().map(|f| f.1).collect();
    assert_eq!(live, vec![1, 0, 0, 0]);
    assert!(recorder.frames.last().unwrap().2.is_empty());
}

#[test]
fn blinker_wraps_across_the_corner() {
    // horizontal line through column 0, split across the left and right edges
    let line = [(0, 4), (0, 0), (0, 1)];
    let summary = play(5, 5, 1, 5, Axis::Row, &line);
    assert_eq!(summary.live_cells, 3);
    assert_eq!(summary.board.alive_cells(), vec![(0, 0), (1, 0), (4, 0)]);

    let back = play(5, 5, 2, 5, Axis::Col, &line);
    assert_eq!(back.board.alive_cells(), vec![(0, 0), (0, 1), (0, 4)]);
}

#[test]
fn glider_returns_home_on_a_torus() {
    // a glider moves one cell diagonally every 4 rounds: 4*8 rounds on 8x8 is a full lap
    let glider = patterns::Pattern::find("glider").unwrap().centered(8, 8);
    let summary = play(8, 8, 32, 4, Axis::Col, &glider);
    let mut expected = glider.clone();
    expected.sort_unstable();
    assert_eq!(summary.board.alive_cells(), expected);
    assert_eq!(summary.live_cells, 5);
}

#[test]
fn final_board_is_independent_of_partitioning() {
    let soup = patterns::random_soup(17, 23, 42);
    let reference = play(17, 23, 30, 1, Axis::Row, &soup);
    for workers in [2, 3, 7, 17] {
        for axis in [Axis::Row, Axis::Col] {
            let summary = play(17, 23, 30, workers, axis, &soup);
            assert_eq!(summary.board, reference.board, "{workers} workers on {axis} axis");
            assert_eq!(summary.live_cells, reference.live_cells);
        }
    }
}

#[test]
fn partition_report_is_delivered_before_the_run() {
    let mut recorder = Recorder::default();
    let config = config(9, 4, 1, 4, Axis::Row).with_print_partition(true);
    Simulation::new(config, &[]).unwrap().run(&mut recorder).unwrap();
    let heights: Vec<_> = recorder.partition.iter().map(|r| r.height()).collect();
    assert_eq!(heights, vec![3, 2, 2, 2]);
}

#[test]
fn too_many_workers_fails_before_start() {
    let err = Simulation::new(config(3, 10, 1, 4, Axis::Row), &[]).err().unwrap();
    assert!(matches!(err, GolError::Config { .. }));
    assert!(Simulation::new(config(10, 3, 1, 4, Axis::Col), &[]).is_err());
}

#[test]
fn out_of_range_cell_fails_before_start() {
    assert!(Simulation::new(config(3, 3, 1, 1, Axis::Row), &[(0, 3)]).is_err());
}

#[test]
fn duplicate_seed_cells_are_counted_once() {
    let summary = play(5, 5, 0, 1, Axis::Row, &[(2, 2), (2, 2)]);
    assert_eq!(summary.live_cells, 1);
}

/// Fails on the given round, as a terminal would if stdout went away.
struct FailingRenderer {
    fail_on: u32,
}

impl Renderer for FailingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> conway::Result<()> {
        if frame.round() == self.fail_on {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into());
        }
        Ok(())
    }
}

#[test]
fn render_failure_stops_every_worker() {
    let err = Simulation::new(config(8, 8, 10, 4, Axis::Row), &HORIZONTAL)
        .unwrap()
        .run(&mut FailingRenderer { fail_on: 3 })
        .unwrap_err();
    assert!(matches!(err, GolError::Io(_)), "got {err:?}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_counter_matches_final_board(
        rows in 1usize..14,
        cols in 1usize..14,
        rounds in 0u32..12,
        seed in any::<u64>(),
        pick in 0usize..100,
        by_col in any::<bool>(),
    ) {
        let axis = if by_col { Axis::Col } else { Axis::Row };
        let workers = pick % axis.extent(rows, cols) + 1;
        let soup = patterns::random_soup(rows, cols, seed);

        let summary = play(rows, cols, rounds, workers, axis, &soup);
        prop_assert_eq!(summary.live_cells, summary.board.alive_count() as i64);

        let reference = play(rows, cols, rounds, 1, Axis::Row, &soup);
        prop_assert_eq!(summary.board, reference.board);
    }
}
