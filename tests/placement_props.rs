use broadside::placement::{self, can_place, place_fleet, place_fleet_with, place_layout};
use broadside::{Cell, GameError, Grid, Orientation, Placement, ShipKind, FLEET, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Random fleets never overlap and stay on the board.
    #[test]
    fn random_fleet_is_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new();
        let (fleet, index) = place_fleet(&mut rng, &mut grid, 0).unwrap();

        prop_assert_eq!(fleet.len(), FLEET.len());
        prop_assert_eq!(grid.occupied().count_ones(), TOTAL_SHIP_CELLS);
        prop_assert_eq!(index.len(), TOTAL_SHIP_CELLS);

        for kind in FLEET {
            let ship = fleet.by_kind(kind).unwrap();
            prop_assert_eq!(ship.hit_count(), 0);
            let cells = grid.count(Cell::Ship(kind));
            prop_assert_eq!(cells, kind.size());
        }

        for (x, y, cell) in grid.iter() {
            match cell {
                Cell::Ship(kind) => {
                    let id = index.get(x, y).unwrap();
                    prop_assert_eq!(fleet.get(id).unwrap().kind(), kind);
                }
                other => {
                    prop_assert_eq!(other, Cell::Empty);
                    prop_assert!(index.get(x, y).is_none());
                }
            }
        }
    }

    /// Each ship's cells form one straight run of its length.
    #[test]
    fn random_ships_are_straight(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new();
        place_fleet(&mut rng, &mut grid, 0).unwrap();

        for kind in FLEET {
            let cells: Vec<(usize, usize)> = grid
                .iter()
                .filter(|&(_, _, c)| c == Cell::Ship(kind))
                .map(|(x, y, _)| (x, y))
                .collect();
            let same_row = cells.iter().all(|&(_, y)| y == cells[0].1);
            let same_col = cells.iter().all(|&(x, _)| x == cells[0].0);
            prop_assert!(same_row || same_col);
            let span = if same_row {
                cells.iter().map(|c| c.0).max().unwrap() - cells.iter().map(|c| c.0).min().unwrap()
            } else {
                cells.iter().map(|c| c.1).max().unwrap() - cells.iter().map(|c| c.1).min().unwrap()
            };
            prop_assert_eq!(span + 1, kind.size());
        }
    }
}

#[test]
fn test_same_seed_same_fleet() {
    let mut a = Grid::new();
    let mut b = Grid::new();
    place_fleet(&mut SmallRng::seed_from_u64(7), &mut a, 0).unwrap();
    place_fleet(&mut SmallRng::seed_from_u64(7), &mut b, 0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_ids_start_at_first_id() {
    let mut grid = Grid::new();
    let (fleet, _) = place_fleet(&mut SmallRng::seed_from_u64(1), &mut grid, 5).unwrap();
    let ids: Vec<u32> = fleet.ships().iter().map(|s| s.id().0).collect();
    assert_eq!(ids, vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_exhaustion_on_full_board() {
    // Every cell already fired upon: nothing is Empty.
    let full = Grid::from_flat(&vec![Cell::Miss; 100]).unwrap();
    let mut grid = full.clone();
    let mut rng = SmallRng::seed_from_u64(3);
    let err = place_fleet_with(&mut rng, &mut grid, &[ShipKind::Destroyer], 0, 50).unwrap_err();
    assert_eq!(
        err,
        GameError::PlacementExhausted {
            kind: ShipKind::Destroyer,
            attempts: 50
        }
    );
    assert_eq!(grid, full);
}

#[test]
fn test_random_placement_respects_existing_ships() {
    let mut grid = Grid::new();
    place_layout(
        &mut grid,
        &[Placement::new(ShipKind::Carrier, 0, 0, Orientation::Horizontal)],
        0,
    )
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..50 {
        let p = placement::random_placement(&mut rng, &grid, ShipKind::Battleship, 1000).unwrap();
        assert!(can_place(&grid, &p));
        assert!(p.cells().all(|(x, y)| !(y == 0 && x < 5)));
    }
}

#[test]
fn test_layout_places_ships() {
    let mut grid = Grid::new();
    let layout = [
        Placement::new(ShipKind::Destroyer, 0, 0, Orientation::Horizontal),
        Placement::new(ShipKind::Carrier, 9, 5, Orientation::Vertical),
    ];
    let (fleet, index) = place_layout(&mut grid, &layout, 0).unwrap();

    assert_eq!(fleet.len(), 2);
    assert_eq!(grid.get(1, 0), Some(Cell::Ship(ShipKind::Destroyer)));
    assert_eq!(grid.get(9, 9), Some(Cell::Ship(ShipKind::Carrier)));
    assert_eq!(index.get(9, 5), fleet.by_kind(ShipKind::Carrier).map(|s| s.id()));
}

#[test]
fn test_ships_may_touch() {
    let mut grid = Grid::new();
    let layout = [
        Placement::new(ShipKind::Destroyer, 0, 0, Orientation::Horizontal),
        Placement::new(ShipKind::Cruiser, 0, 1, Orientation::Horizontal),
        Placement::new(ShipKind::Submarine, 2, 0, Orientation::Horizontal),
    ];
    place_layout(&mut grid, &layout, 0).unwrap();

    // side by side along row 0 and stacked across rows 0 and 1
    assert_eq!(grid.get(1, 0), Some(Cell::Ship(ShipKind::Destroyer)));
    assert_eq!(grid.get(2, 0), Some(Cell::Ship(ShipKind::Submarine)));
    assert_eq!(grid.get(0, 1), Some(Cell::Ship(ShipKind::Cruiser)));
    assert_eq!(grid.get(2, 1), Some(Cell::Ship(ShipKind::Cruiser)));
    assert_eq!(grid.occupied().count_ones(), 8);
}

#[test]
fn test_layout_errors_leave_grid_untouched() {
    let cases = [
        (
            vec![Placement::new(ShipKind::Carrier, 6, 0, Orientation::Horizontal)],
            GameError::ShipOutOfBounds,
        ),
        (
            vec![Placement::new(ShipKind::Destroyer, 0, 9, Orientation::Vertical)],
            GameError::ShipOutOfBounds,
        ),
        (
            vec![
                Placement::new(ShipKind::Destroyer, 0, 0, Orientation::Horizontal),
                Placement::new(ShipKind::Cruiser, 1, 0, Orientation::Vertical),
            ],
            GameError::ShipOverlaps,
        ),
        (
            vec![
                Placement::new(ShipKind::Destroyer, 0, 0, Orientation::Horizontal),
                Placement::new(ShipKind::Destroyer, 0, 5, Orientation::Horizontal),
            ],
            GameError::DuplicateShipKind,
        ),
        (
            vec![Placement::new(ShipKind::Destroyer, usize::MAX, 0, Orientation::Horizontal)],
            GameError::ShipOutOfBounds,
        ),
        (
            vec![Placement::new(ShipKind::Carrier, 0, usize::MAX - 1, Orientation::Vertical)],
            GameError::ShipOutOfBounds,
        ),
        (
            vec![Placement::new(ShipKind::Cruiser, 12, 3, Orientation::Vertical)],
            GameError::ShipOutOfBounds,
        ),
    ];
    for (layout, expected) in cases {
        let mut grid = Grid::new();
        assert_eq!(place_layout(&mut grid, &layout, 0).unwrap_err(), expected);
        assert_eq!(grid, Grid::new());
    }
}

#[test]
fn test_placement_cells_and_bounds() {
    let p = Placement::new(ShipKind::Cruiser, 7, 2, Orientation::Horizontal);
    assert_eq!(p.cells().collect::<Vec<_>>(), vec![(7, 2), (8, 2), (9, 2)]);
    assert!(p.in_bounds());
    let p = Placement::new(ShipKind::Cruiser, 8, 2, Orientation::Horizontal);
    assert!(!p.in_bounds());
    let p = Placement::new(ShipKind::Battleship, 3, 6, Orientation::Vertical);
    assert_eq!(p.cells().last(), Some((3, 9)));
    assert!(p.in_bounds());
}

#[test]
fn test_ship_ids_must_fit() {
    let layout = [
        Placement::new(ShipKind::Destroyer, 0, 0, Orientation::Horizontal),
        Placement::new(ShipKind::Cruiser, 0, 2, Orientation::Horizontal),
    ];
    let mut grid = Grid::new();
    assert_eq!(
        place_layout(&mut grid, &layout, u32::MAX).unwrap_err(),
        GameError::ShipIdOverflow
    );
    assert_eq!(grid, Grid::new());

    // the last usable id is u32::MAX - 1
    let (fleet, _) = place_layout(&mut grid, &layout, u32::MAX - 2).unwrap();
    let ids: Vec<u32> = fleet.ships().iter().map(|s| s.id().0).collect();
    assert_eq!(ids, vec![u32::MAX - 2, u32::MAX - 1]);

    let mut grid = Grid::new();
    let mut rng = SmallRng::seed_from_u64(4);
    assert_eq!(
        place_fleet(&mut rng, &mut grid, u32::MAX - 3).unwrap_err(),
        GameError::ShipIdOverflow
    );
    assert_eq!(grid, Grid::new());
}

#[test]
fn test_far_origin_does_not_fit() {
    let p = Placement::new(ShipKind::Destroyer, usize::MAX, 0, Orientation::Horizontal);
    assert!(!p.in_bounds());
    assert!(!can_place(&Grid::new(), &p));
    assert_eq!(p.cells().last(), Some((usize::MAX, 0)));
}
