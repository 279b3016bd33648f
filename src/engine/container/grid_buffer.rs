use super::error::ContainerError;

/// Fixed-size, row-major 2D grid.
///
/// Reads outside the grid return `None`, writes outside it are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBuffer<T> {
    width:  u32,
    height: u32,
    cells:  Vec<T>,
}

impl<T: Copy + Default> GridBuffer<T> {
    /// Allocates a `width`x`height` grid filled with `initial`, or `T::default()`.
    pub fn new(width: u32, height: u32, initial: Option<T>) -> Result<Self, ContainerError> {
        #[allow(clippy::as_conversions)]
        let num_cells = (width as usize)
            .checked_mul(height as usize)
            .ok_or(ContainerError::SizeOverflow { what: "grid", width, height })?;

        Ok(Self { width, height, cells: vec![initial.unwrap_or_default(); num_cells] })
    }
}

impl<T: Copy> GridBuffer<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.offset(x, y).map(|offset| self.cells[offset])
    }

    /// Writes outside the grid are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if let Some(offset) = self.offset(x, y) {
            self.cells[offset] = value;
        }
    }

    /// Fills every cell with `value`.
    pub fn clear(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Cells in row-major order, row `y` starting at `y * width`.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    #[allow(clippy::as_conversions)]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }
}
