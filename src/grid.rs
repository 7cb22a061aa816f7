pub const GRID_COLUMNS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const TILE_SLOTS: usize = GRID_COLUMNS * GRID_ROWS;

pub type Row<'a, T> = [Option<&'a T>; GRID_COLUMNS];

/// One content page worth of slots, row-major. Trailing slots of the last
/// tile of a section are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<'a, T> {
    pub rows: [Row<'a, T>; GRID_ROWS],
}

impl<'a, T> Tile<'a, T> {
    pub fn get(&self, row: usize, column: usize) -> Option<&'a T> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .flatten()
    }

    /// Occupied slots as `(row, column, item)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &'a T)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.map(|item| (row, column, item)))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }
}

/// Chunks items into rows of three, then rows into tiles of three, padding
/// both levels with empty slots.
pub fn paginate<T>(items: &[T]) -> Vec<Tile<'_, T>> {
    let rows: Vec<Row<'_, T>> = items
        .chunks(GRID_COLUMNS)
        .map(|chunk| {
            let mut row: Row<'_, T> = [None; GRID_COLUMNS];
            for (slot, item) in row.iter_mut().zip(chunk) {
                *slot = Some(item);
            }
            row
        })
        .collect();

    rows.chunks(GRID_ROWS)
        .map(|chunk| {
            let mut tile = Tile {
                rows: [[None; GRID_COLUMNS]; GRID_ROWS],
            };
            for (slot, row) in tile.rows.iter_mut().zip(chunk) {
                *slot = *row;
            }
            tile
        })
        .collect()
}

/// Number of tiles `paginate` produces for `item_count` items.
pub fn tile_count(item_count: usize) -> usize {
    item_count.div_ceil(TILE_SLOTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_items_no_tiles() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items).is_empty());
        assert_eq!(tile_count(0), 0);
    }

    #[test]
    fn single_item_pads_eight_slots() {
        let items = vec!["R1"];
        let tiles = paginate(&items);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].get(0, 0), Some(&"R1"));
        assert_eq!(tiles[0].occupied_count(), 1);
        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                if (row, column) != (0, 0) {
                    assert_eq!(tiles[0].get(row, column), None);
                }
            }
        }
    }

    #[test]
    fn tile_counts_match_ceiling_division() {
        for n in [0usize, 1, 2, 3, 8, 9, 10, 17, 18, 19, 27, 100] {
            let items: Vec<usize> = (0..n).collect();
            let tiles = paginate(&items);
            assert_eq!(tiles.len(), n.div_ceil(9), "n = {n}");
            assert_eq!(tiles.len(), tile_count(n));
        }
    }

    #[test]
    fn items_land_in_row_major_positions() {
        let items: Vec<usize> = (0..20).collect();
        let tiles = paginate(&items);
        for k in 0..items.len() {
            let tile = &tiles[k / 9];
            assert_eq!(tile.get((k % 9) / 3, k % 3), Some(&k), "item {k}");
        }
        assert_eq!(tiles[2].occupied_count(), 2);
        assert_eq!(tiles[2].get(0, 2), None);
        assert_eq!(tiles[2].get(1, 0), None);
    }

    #[test]
    fn flattening_tiles_reproduces_input_order() {
        let items: Vec<String> = (1..=23).map(|i| format!("R{i}")).collect();
        let flattened: Vec<&String> = paginate(&items)
            .iter()
            .flat_map(|tile| tile.occupied().map(|(_, _, item)| item).collect::<Vec<_>>())
            .collect();
        assert_eq!(flattened, items.iter().collect::<Vec<_>>());
    }

    #[test]
    fn out_of_grid_lookup_is_empty() {
        let items = vec![1, 2, 3];
        let tiles = paginate(&items);
        assert_eq!(tiles[0].get(3, 0), None);
        assert_eq!(tiles[0].get(0, 3), None);
    }
}
