use crate::grid::Cell;

/// A named stamp pattern, as offsets from its own origin at (0, 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: String,
    pub offsets: Vec<Cell>,
}

impl Shape {
    /// Offsets are given as (x, y): horizontal first, then vertical
    pub fn new(name: impl Into<String>, offsets: &[(i32, i32)]) -> Self {
        Self {
            name: name.into(),
            offsets: offsets.iter().map(|&(x, y)| Cell::new(y, x)).collect(),
        }
    }

    /// Shape offsets translated so that the origin lands on `anchor`
    pub fn translate(&self, anchor: Cell) -> Vec<Cell> {
        self.offsets.iter().map(|&offset| anchor.offset(offset)).collect()
    }
}

/// `n` colinear cells (0,0)..(n-1,0) in (x, y), a horizontal line
pub fn line(n: usize) -> Vec<Cell> {
    (0..n as i32).map(|x| Cell::new(0, x)).collect()
}

/// The fixed set of shapes available to the placement tool
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

const EMPTY: &[Cell] = &[];

impl ShapeCatalog {
    /// Build the catalog for a grid with `rows` rows. The line shape is as
    /// long as half the grid height.
    pub fn new(rows: usize) -> Self {
        let shapes = vec![
            Shape::new("single", &[(0, 0)]),
            Shape::new("box", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
            Shape::new("glider", &[(0, 0), (2, 0), (1, 1), (2, 1), (1, 2)]),
            Shape {
                name: "line".to_string(),
                offsets: line(rows / 2),
            },
        ];
        Self { shapes }
    }

    /// Offsets for a shape name. Unknown names give an empty shape, since the
    /// name comes from a UI control that may briefly hold anything.
    pub fn lookup(&self, name: &str) -> &[Cell] {
        self.find(name).map_or(EMPTY, |shape| shape.offsets.as_slice())
    }

    /// Find a shape by name
    pub fn find(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Shape names for display, in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.shapes.iter().map(|shape| shape.name.as_str()).collect()
    }

    /// Name following `name` in catalog order, wrapping around.
    /// Unknown names start from the first shape.
    pub fn next_name(&self, name: &str) -> &str {
        match self.shapes.iter().position(|shape| shape.name == name) {
            Some(idx) => &self.shapes[(idx + 1) % self.shapes.len()].name,
            None => &self.shapes[0].name,
        }
    }

    /// Name preceding `name` in catalog order, wrapping around
    pub fn prev_name(&self, name: &str) -> &str {
        let len = self.shapes.len();
        match self.shapes.iter().position(|shape| shape.name == name) {
            Some(idx) => &self.shapes[(idx + len - 1) % len].name,
            None => &self.shapes[len - 1].name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shapes() {
        let catalog = ShapeCatalog::new(250);
        assert_eq!(catalog.names(), vec!["single", "box", "glider", "line"]);
        assert_eq!(catalog.lookup("single"), &[Cell::new(0, 0)]);
        assert_eq!(catalog.lookup("box").len(), 4);
        assert_eq!(catalog.lookup("glider").len(), 5);
    }

    #[test]
    fn test_line_is_horizontal_and_half_grid_height() {
        let catalog = ShapeCatalog::new(250);
        let line = catalog.lookup("line");
        assert_eq!(line.len(), 125);
        assert_eq!(line[0], Cell::new(0, 0));
        assert_eq!(line[124], Cell::new(0, 124));
        assert!(line.iter().all(|c| c.row == 0));

        assert_eq!(ShapeCatalog::new(9).lookup("line").len(), 4);
    }

    #[test]
    fn test_unknown_shape_is_empty() {
        let catalog = ShapeCatalog::new(10);
        assert!(catalog.lookup("spaceship").is_empty());
        assert!(catalog.lookup("").is_empty());
        assert!(!catalog.contains("Box"));
    }

    #[test]
    fn test_glider_offsets_are_x_first() {
        let catalog = ShapeCatalog::new(10);
        // (2, 0) is two cells to the right of the origin
        assert_eq!(catalog.lookup("glider")[1], Cell::new(0, 2));
    }

    #[test]
    fn test_translate() {
        let catalog = ShapeCatalog::new(10);
        let boxed = catalog.find("box").unwrap();
        assert_eq!(
            boxed.translate(Cell::new(3, 7)),
            vec![Cell::new(3, 7), Cell::new(3, 8), Cell::new(4, 7), Cell::new(4, 8)]
        );
    }

    #[test]
    fn test_name_cycling() {
        let catalog = ShapeCatalog::new(10);
        assert_eq!(catalog.next_name("single"), "box");
        assert_eq!(catalog.next_name("line"), "single");
        assert_eq!(catalog.prev_name("single"), "line");
        assert_eq!(catalog.prev_name("glider"), "box");
        assert_eq!(catalog.next_name("bogus"), "single");
    }
}
