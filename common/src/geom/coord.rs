/// A cell on the two-layer routing grid. Layers are 0-based in memory;
/// the 1-based convention of the on-disk formats is applied at the text
/// boundary only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoord {
    pub layer: u8,
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub fn new(layer: u8, x: u32, y: u32) -> Self {
        Self { layer, x, y }
    }

    /// In-plane Manhattan distance; ignores the layer.
    pub fn manhattan(&self, other: &GridCoord) -> i64 {
        (self.x as i64 - other.x as i64).abs() + (self.y as i64 - other.y as i64).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_ignores_layer() {
        let a = GridCoord::new(0, 2, 3);
        let b = GridCoord::new(1, 5, 1);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
    }

    #[test]
    fn ordering_is_layer_major() {
        let mut cells = vec![
            GridCoord::new(1, 0, 0),
            GridCoord::new(0, 9, 9),
            GridCoord::new(0, 9, 3),
        ];
        cells.sort();
        assert_eq!(cells[0], GridCoord::new(0, 9, 3));
        assert_eq!(cells[2], GridCoord::new(1, 0, 0));
    }
}
