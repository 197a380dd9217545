use enum_map::enum_map;
use knot_wfc::render::text_renderer::render_to_string;
use knot_wfc::{Cell, Constraint, Direction, Grid, Solver, SolverState, Step, TileKind, TileSet};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

// Fixed seed for deterministic tests
const TEST_SEED: u64 = 42;

fn solved_grid(rows: usize, columns: usize, seed: u64) -> (Grid<Cell>, Solver) {
    let mut grid = Grid::create(rows, columns, &TileSet::new());
    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(seed);

    solver.run(&mut grid, &mut rng);

    (grid, solver)
}

fn resolved_tiles(grid: &Grid<Cell>) -> Vec<Option<TileKind>> {
    grid.iter().map(|(_, _, cell)| cell.resolved()).collect()
}

#[test]
fn run_collapses_every_cell_exactly_once() {
    for (rows, columns) in [(1, 1), (1, 5), (4, 1), (6, 8), (10, 7)] {
        let mut grid = Grid::create(rows, columns, &TileSet::new());
        let mut solver = Solver::new();
        let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

        let collapses = solver.run(&mut grid, &mut rng);

        assert_eq!(collapses, rows * columns);
        assert_eq!(solver.collapses(), rows * columns);
        assert_eq!(solver.state(), SolverState::Complete);
        assert!(grid.is_fully_collapsed());
        assert_eq!(grid.remaining(), 0);
    }
}

#[test]
fn each_step_collapses_one_cell_in_scan_order() {
    let mut grid = Grid::create(3, 4, &TileSet::new());
    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    for expected in 0..12 {
        let step = solver.step(&mut grid, &mut rng);
        let collapsed: Vec<usize> = grid
            .iter()
            .enumerate()
            .filter(|(_, (_, _, cell))| cell.is_collapsed())
            .map(|(index, _)| index)
            .collect();

        assert_eq!(collapsed, (0..=expected).collect::<Vec<_>>());
        assert_eq!(step == Step::Done, expected == 11);
    }
}

#[test]
fn adjacent_resolved_tiles_agree_on_their_shared_edge() {
    for seed in 0..64 {
        let (grid, _) = solved_grid(7, 9, seed);

        for (row, column, cell) in &grid {
            let Some(tile) = cell.resolved() else { continue };

            for direction in [Direction::Right, Direction::Down] {
                let neighbor = grid
                    .neighbor(row, column, direction)
                    .and_then(Cell::resolved);

                if let Some(neighbor) = neighbor {
                    assert_eq!(
                        tile.connector(direction),
                        neighbor.connector(direction.invert()),
                        "seed {} at ({}, {}) facing {:?}",
                        seed,
                        row,
                        column,
                        direction
                    );
                }
            }
        }
    }
}

#[test]
fn no_line_leaves_the_grid() {
    for seed in 0..64 {
        let (grid, _) = solved_grid(5, 6, seed);

        for (row, column, cell) in &grid {
            for direction in Direction::ALL {
                if grid.neighbor(row, column, direction).is_some() {
                    continue;
                }

                assert!(
                    cell.options().iter().all(|tile| !tile.connector(direction)),
                    "seed {} at ({}, {}) opens {:?}",
                    seed,
                    row,
                    column,
                    direction
                );
            }
        }
    }
}

#[test]
fn same_seed_same_pattern() {
    let (first, _) = solved_grid(6, 8, TEST_SEED);
    let (second, _) = solved_grid(6, 8, TEST_SEED);

    assert_eq!(resolved_tiles(&first), resolved_tiles(&second));
}

#[test]
fn step_after_completion_is_a_no_op() {
    let (mut grid, mut solver) = solved_grid(4, 4, TEST_SEED);
    let before = resolved_tiles(&grid);
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    for _ in 0..3 {
        assert_eq!(solver.step(&mut grid, &mut rng), Step::Done);
    }

    assert_eq!(resolved_tiles(&grid), before);
    assert_eq!(solver.collapses(), 16);
}

#[test]
fn single_cell_is_blank() {
    let mut grid = Grid::create(1, 1, &TileSet::new());
    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    assert_eq!(solver.step(&mut grid, &mut rng), Step::Done);
    assert_eq!(resolved_tiles(&grid), vec![Some(TileKind::Blank)]);
}

#[test]
fn single_row_pair_finishes_in_two_steps() {
    let mut grid = Grid::create(1, 2, &TileSet::new());
    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    assert_eq!(solver.step(&mut grid, &mut rng), Step::Continue);
    assert_eq!(grid.remaining(), 1);
    assert_eq!(solver.step(&mut grid, &mut rng), Step::Done);

    let tiles = resolved_tiles(&grid);
    let (Some(left), Some(right)) = (tiles[0], tiles[1]) else {
        panic!("both cells should resolve: {:?}", tiles);
    };
    assert_eq!(left.connector(Direction::Right), right.connector(Direction::Left));
}

#[test]
fn two_by_two_is_blank_or_a_closed_loop() {
    let blank = vec![Some(TileKind::Blank); 4];
    let loop_ = vec![
        Some(TileKind::BottomRightTurn),
        Some(TileKind::BottomLeftTurn),
        Some(TileKind::TopRightTurn),
        Some(TileKind::TopLeftTurn),
    ];

    let mut seen_blank = false;
    let mut seen_loop = false;

    for seed in 0..64 {
        let (grid, solver) = solved_grid(2, 2, seed);
        let tiles = resolved_tiles(&grid);

        assert_eq!(solver.contradictions(), 0);

        if tiles == blank {
            seen_blank = true;
        } else if tiles == loop_ {
            seen_loop = true;
        } else {
            panic!("seed {} produced {:?}", seed, tiles);
        }
    }

    assert!(seen_blank && seen_loop);
}

#[test]
fn seeded_runs_count_every_gap() {
    for seed in 0..64 {
        let (grid, solver) = solved_grid(6, 8, seed);

        let gaps = grid
            .iter()
            .filter(|(_, _, cell)| cell.is_contradiction())
            .count();

        assert_eq!(gaps, solver.contradictions());
        assert!(grid.is_fully_collapsed());
        assert_eq!(solver.collapses(), 48);

        for (_, _, cell) in &grid {
            assert!(cell.entropy() <= 1);
        }
    }
}

/// A collapsed horizontal segment with open left and right connectors.
fn horizontal_cell(row: usize, column: usize) -> Cell {
    let mut cell = Cell::new(row, column, &TileSet::new());
    cell.recompute_options(&enum_map! {
        Direction::Left | Direction::Right => Constraint::Connector(true),
        Direction::Up | Direction::Down => Constraint::Boundary,
    });
    cell.collapse(&mut XorShiftRng::seed_from_u64(TEST_SEED));
    cell
}

#[test]
fn contradictions_are_left_in_place() {
    let mut grid = Grid::create(1, 5, &TileSet::new());
    grid.set(0, 2, horizontal_cell(0, 2)).unwrap();

    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    // (0, 1) and (0, 3) must open towards the segment but the edge forbids it
    assert_eq!(solver.run(&mut grid, &mut rng), 4);
    assert_eq!(solver.contradictions(), 2);
    assert_eq!(solver.state(), SolverState::Complete);
    assert!(grid.is_fully_collapsed());

    for column in [1, 3] {
        let cell = grid.get(0, column).unwrap();
        assert!(cell.is_contradiction(), "column {}", column);
        assert!(cell.is_collapsed());
        assert_eq!(cell.entropy(), 0);
        assert_eq!(cell.resolved(), None);
    }

    // a gap constrains nothing, so the last cell only sees the grid edge
    assert_eq!(grid.constraints(0, 4)[Direction::Left], Constraint::Free);
    assert_eq!(
        resolved_tiles(&grid),
        vec![
            Some(TileKind::Blank),
            None,
            Some(TileKind::Horizontal),
            None,
            Some(TileKind::Blank),
        ]
    );
    assert_eq!(render_to_string(&grid), " ×─× \n");
}

#[test]
fn reset_starts_a_new_generation() {
    let tiles = TileSet::new();
    let mut solver = Solver::new();
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    let mut grid = Grid::create(3, 3, &tiles);
    solver.run(&mut grid, &mut rng);

    solver.reset();
    let mut grid = Grid::create(5, 2, &tiles);

    assert_eq!(solver.state(), SolverState::Incomplete);
    assert_eq!(grid.remaining(), 10);
    assert_eq!(solver.run(&mut grid, &mut rng), 10);
}
