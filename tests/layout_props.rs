use battleship_client::{
    board_size_from_cell_count, random_layout, Battlefield, CellFlags, Coordinate, GameError,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layout_stays_on_board(seed in any::<u64>(), size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ships = random_layout(&mut rng, size).unwrap();
        prop_assert_eq!(ships.len(), TOTAL_SHIP_CELLS);
        for coordinate in &ships {
            let (row, col) = coordinate.position().unwrap();
            prop_assert!(row < size && col < size);
        }
        let battlefield = Battlefield::with_ships(size, &ships).unwrap();
        prop_assert_eq!(battlefield.coordinates_with(CellFlags::SHIP), ships);
    }

    #[test]
    fn layout_is_deterministic_per_seed(seed in any::<u64>()) {
        let first = random_layout(&mut SmallRng::seed_from_u64(seed), 10).unwrap();
        let second = random_layout(&mut SmallRng::seed_from_u64(seed), 10).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn battlefield_has_unique_coordinates(size in 1usize..=MAX_BOARD_SIZE) {
        let battlefield = Battlefield::new(size);
        prop_assert_eq!(battlefield.cells().len(), size * size);
        let mut coordinates: Vec<&Coordinate> =
            battlefield.cells().iter().map(|cell| cell.coordinate()).collect();
        coordinates.sort();
        coordinates.dedup();
        prop_assert_eq!(coordinates.len(), size * size);
    }

    #[test]
    fn size_derivation_accepts_only_squares(n in 1usize..200) {
        prop_assert_eq!(board_size_from_cell_count(n * n), Ok(n));
        if n > 1 {
            prop_assert_eq!(
                board_size_from_cell_count(n * n - 1),
                Err(GameError::NonSquareBoard(n * n - 1))
            );
        }
    }
}

#[test]
fn test_layout_rejects_board_too_small_for_the_fleet() {
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(random_layout(&mut rng, 4), Err(GameError::UnableToPlaceShip("Carrier")));
}
