use crate::error::{MathError, MathResult};
use crate::vector::Vector;
use crate::Real;

/// A square `size` x `size` matrix with row-major indexing.
///
/// All operations return new matrices; cells are only written while a
/// matrix is being generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    size: usize,
    cells: Vec<Real>,
}

impl Transformation {
    /// The identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        Transformation::generate(size, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    /// Builds a matrix by evaluating [generator] for every (row, col) cell.
    pub fn generate(size: usize, mut generator: impl FnMut(usize, usize) -> Real) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for r in 0..size {
            for c in 0..size {
                cells.push(generator(r, c));
            }
        }
        return Transformation { size, cells };
    }

    /// Populates a `size` x `size` matrix from [rows]. Cells missing from the
    /// given rows are taken from the identity matrix.
    pub fn from_rows(size: usize, rows: &[&[Real]]) -> Self {
        Transformation::generate(size, |r, c| {
            match rows.get(r).and_then(|row| row.get(c)) {
                Some(&cell) => cell,
                None => if r == c { 1.0 } else { 0.0 },
            }
        })
    }

    /// (n+1)-dimensional homogeneous scale by the same [factor] on every axis.
    pub fn uniform_scale(size: usize, factor: Real) -> Self {
        let last = size.saturating_sub(1);
        Transformation::generate(size, |r, c| {
            if r != c {
                0.0
            } else if r < last {
                factor
            } else {
                1.0
            }
        })
    }

    /// Homogeneous scale matrix with one factor per axis; the result has one
    /// more row and column than [factors] has components.
    pub fn scale(factors: &Vector) -> Self {
        let size = factors.len() + 1;
        Transformation::generate(size, |r, c| {
            if r != c {
                0.0
            } else if r < size - 1 {
                factors[r]
            } else {
                1.0
            }
        })
    }

    /// Homogeneous translation with [offset] in the last column.
    pub fn translate(offset: &Vector) -> Self {
        let size = offset.len() + 1;
        Transformation::generate(size, |r, c| {
            if c == size - 1 && r < size - 1 {
                offset[r]
            } else if r == c {
                1.0
            } else {
                0.0
            }
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Real {
        self.cells[row * self.size + col]
    }

    pub fn try_get(&self, row: usize, col: usize) -> MathResult<Real> {
        if row >= self.size || col >= self.size {
            return Err(MathError::IndexOutOfBounds { row, col, size: self.size });
        }
        Ok(self.get(row, col))
    }

    pub fn row(&self, index: usize) -> Vector {
        Vector::new(self.cells[index * self.size..(index + 1) * self.size].to_vec())
    }

    pub fn col(&self, index: usize) -> Vector {
        Vector::new((0..self.size).map(|r| self.get(r, index)).collect())
    }

    /// Maps every cell through [f], which also receives the cell's row and
    /// column.
    pub fn cell_map(&self, mut f: impl FnMut(Real, usize, usize) -> Real) -> Self {
        Transformation::generate(self.size, |r, c| f(self.get(r, c), r, c))
    }

    fn check_same_size(&self, other: &Transformation) -> MathResult<()> {
        if self.size != other.size {
            return Err(MathError::DimensionMismatch { expected: self.size, found: other.size });
        }
        Ok(())
    }

    /// `self · right`. When the result transforms a vector, [right] is
    /// applied first.
    pub fn append(&self, right: &Transformation) -> MathResult<Transformation> {
        self.check_same_size(right)?;
        return Ok(self.product(right));
    }

    /// Matrix product without the size check. Both operands must have the
    /// same size.
    pub(crate) fn product(&self, right: &Transformation) -> Transformation {
        let n = self.size;
        Transformation::generate(n, |r, c| {
            (0..n).map(|k| self.get(r, k) * right.get(k, c)).sum()
        })
    }

    /// `left · self`.
    pub fn prepend(&self, left: &Transformation) -> MathResult<Transformation> {
        left.append(self)
    }

    pub fn transpose(&self) -> Transformation {
        Transformation::generate(self.size, |r, c| self.get(c, r))
    }

    /// This matrix with [pivot_row] and [pivot_col] removed.
    pub fn sub_matrix(&self, pivot_row: usize, pivot_col: usize) -> MathResult<Transformation> {
        if self.size == 0 {
            return Err(MathError::ZeroSizedMatrix);
        }
        if pivot_row >= self.size || pivot_col >= self.size {
            return Err(MathError::IndexOutOfBounds { row: pivot_row, col: pivot_col, size: self.size });
        }
        return Ok(self.without(pivot_row, pivot_col));
    }

    /// [Self::sub_matrix] for a pivot already known to be inside the matrix.
    fn without(&self, pivot_row: usize, pivot_col: usize) -> Transformation {
        Transformation::generate(self.size - 1, |r, c| {
            let source_row = if r < pivot_row { r } else { r + 1 };
            let source_col = if c < pivot_col { c } else { c + 1 };
            self.get(source_row, source_col)
        })
    }

    /// Signed minor for a cell already known to be inside the matrix.
    fn cofactor_at(&self, row: usize, col: usize) -> Real {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.without(row, col).determinant()
    }

    /// Cofactor expansion along the first row. A 0x0 matrix has determinant 1,
    /// which terminates the recursion.
    pub fn determinant(&self) -> Real {
        if self.size == 0 {
            return 1.0;
        }
        (0..self.size)
            .map(|col| self.get(0, col) * self.cofactor_at(0, col))
            .sum()
    }

    /// Same expansion as [Self::determinant], reusing an already computed
    /// cofactor matrix.
    fn determinant_from_cofactors(&self, cofactors: &Transformation) -> Real {
        if self.size == 0 {
            return 1.0;
        }
        (0..self.size).map(|col| self.get(0, col) * cofactors.get(0, col)).sum()
    }

    pub fn minor(&self, row: usize, col: usize) -> MathResult<Real> {
        Ok(self.sub_matrix(row, col)?.determinant())
    }

    pub fn cofactor(&self, row: usize, col: usize) -> MathResult<Real> {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        Ok(sign * self.minor(row, col)?)
    }

    pub fn cofactor_matrix(&self) -> Transformation {
        Transformation::generate(self.size, |r, c| self.cofactor_at(r, c))
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Transformation {
        self.cofactor_matrix().transpose()
    }

    /// `adjugate / determinant`. Singularity is an exact comparison of the
    /// determinant against zero; see [Self::inverse_within] for a tolerance.
    pub fn inverse(&self) -> MathResult<Transformation> {
        self.inverse_within(0.0)
    }

    /// Like [Self::inverse], treating any determinant with magnitude at most
    /// [epsilon] as singular.
    pub fn inverse_within(&self, epsilon: Real) -> MathResult<Transformation> {
        let cofactors = self.cofactor_matrix();
        let determinant = self.determinant_from_cofactors(&cofactors);
        if determinant.abs() <= epsilon {
            return Err(MathError::SingularMatrix);
        }
        return Ok(cofactors.transpose().cell_map(|cell, _, _| cell / determinant));
    }

    /// Matrix-vector product; [vector] must have exactly `size` components.
    pub fn transform_vector(&self, vector: &Vector) -> MathResult<Vector> {
        if vector.len() != self.size {
            return Err(MathError::DimensionMismatch { expected: self.size, found: vector.len() });
        }
        let components = (0..self.size)
            .map(|r| (0..self.size).map(|c| self.get(r, c) * vector[c]).sum())
            .collect();
        return Ok(Vector::new(components));
    }

    /// Column-major flattening, the layout graphics APIs expect.
    pub fn to_cols_array(&self) -> Vec<Real> {
        self.transpose().cells
    }

    pub fn approx_eq(&self, other: &Transformation, epsilon: Real) -> bool {
        self.size == other.size
            && self.cells.iter().zip(other.cells.iter()).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Transformation::identity(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{vec2, vec3};
    use approx::assert_abs_diff_eq;

    const EPSILON: Real = 1e-9;

    fn sample(size: usize, seed: Real) -> Transformation {
        // diagonally dominant, so always invertible
        Transformation::generate(size, |r, c| ((r * 7 + c * 3) as Real + seed).sin() + if r == c { 10.0 } else { 0.0 })
    }

    #[test]
    fn from_rows_fills_missing_cells_with_identity() {
        let m = Transformation::from_rows(3, &[&[2.0, 3.0]]);
        assert_eq!(m.row(0), vec3(2.0, 3.0, 0.0));
        assert_eq!(m.row(1), vec3(0.0, 1.0, 0.0));
        assert_eq!(m.row(2), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn append_is_associative() {
        for size in 1..=4 {
            let a = sample(size, 0.1);
            let b = sample(size, 1.3);
            let c = sample(size, 2.7);
            let left = a.append(&b).unwrap().append(&c).unwrap();
            let right = a.append(&b.append(&c).unwrap()).unwrap();
            assert!(left.approx_eq(&right, 1e-9), "size {}", size);
        }
    }

    #[test]
    fn append_rejects_mismatched_sizes() {
        let a = Transformation::identity(3);
        let b = Transformation::identity(4);
        assert_eq!(a.append(&b), Err(MathError::DimensionMismatch { expected: 3, found: 4 }));
    }

    #[test]
    fn prepend_multiplies_from_the_left() {
        let a = sample(3, 0.4);
        let b = sample(3, 0.9);
        assert_eq!(a.prepend(&b).unwrap(), b.append(&a).unwrap());
    }

    #[test]
    fn identity_determinant_is_one() {
        for size in 0..=5 {
            assert_eq!(Transformation::identity(size).determinant(), 1.0);
        }
    }

    #[test]
    fn zero_row_gives_zero_determinant() {
        let m = Transformation::from_rows(3, &[&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], &[7.0, 8.0, 10.0]]);
        assert_eq!(m.determinant(), 0.0);
    }

    #[test]
    fn determinant_matches_hand_computed_values() {
        let m = Transformation::from_rows(2, &[&[3.0, 8.0], &[4.0, 6.0]]);
        assert_eq!(m.determinant(), -14.0);
        let m = Transformation::from_rows(3, &[&[6.0, 1.0, 1.0], &[4.0, -2.0, 5.0], &[2.0, 8.0, 7.0]]);
        assert_eq!(m.determinant(), -306.0);
    }

    #[test]
    fn transpose_twice_is_identity_operation() {
        let m = sample(4, 0.5);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().get(1, 3), m.get(3, 1));
    }

    #[test]
    fn sub_matrix_removes_row_and_column() {
        let m = Transformation::generate(3, |r, c| (r * 3 + c) as Real);
        let sub = m.sub_matrix(1, 1).unwrap();
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.row(0), vec2(0.0, 2.0));
        assert_eq!(sub.row(1), vec2(6.0, 8.0));
        assert_eq!(Transformation::identity(0).sub_matrix(0, 0), Err(MathError::ZeroSizedMatrix));
    }

    #[test]
    fn cofactor_sign_alternates() {
        let m = Transformation::from_rows(2, &[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(m.cofactor(0, 0).unwrap(), 4.0);
        assert_eq!(m.cofactor(0, 1).unwrap(), -3.0);
        assert_eq!(m.cofactor(1, 0).unwrap(), -2.0);
        assert_eq!(m.cofactor(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn cofactor_matrix_matches_each_cofactor() {
        let m = sample(4, 1.3);
        let cofactors = m.cofactor_matrix();
        for r in 0..4 {
            for c in 0..4 {
                assert_abs_diff_eq!(cofactors.get(r, c), m.cofactor(r, c).unwrap(), epsilon = EPSILON);
            }
        }
        assert!(m.cofactor(4, 0).is_err());
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        for size in 1..=4 {
            let m = sample(size, 0.77);
            let product = m.append(&m.inverse().unwrap()).unwrap();
            assert!(product.approx_eq(&Transformation::identity(size), EPSILON), "size {}", size);
        }
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Transformation::from_rows(2, &[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(m.inverse(), Err(MathError::SingularMatrix));
    }

    #[test]
    fn tolerance_catches_nearly_singular_matrices() {
        let m = Transformation::from_rows(2, &[&[1.0, 2.0], &[1.0, 2.0 + 1e-14]]);
        assert!(m.inverse().is_ok());
        assert_eq!(m.inverse_within(1e-10), Err(MathError::SingularMatrix));
    }

    #[test]
    fn translate_moves_origin() {
        let t = Transformation::translate(&vec3(1.0, 2.0, 3.0));
        assert_eq!(t.size(), 4);
        let moved = t.transform_vector(&Vector::from([0.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(moved, Vector::from([1.0, 2.0, 3.0, 1.0]));
        let direction = t.transform_vector(&Vector::from([1.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(direction, Vector::from([1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn scale_factories_keep_homogeneous_row() {
        let s = Transformation::scale(&vec3(2.0, 3.0, 4.0));
        assert_eq!(s.row(3), Vector::from([0.0, 0.0, 0.0, 1.0]));
        assert_eq!(s.get(1, 1), 3.0);
        let u = Transformation::uniform_scale(4, 5.0);
        assert_eq!(u.get(0, 0), 5.0);
        assert_eq!(u.get(2, 2), 5.0);
        assert_eq!(u.get(3, 3), 1.0);
    }

    #[test]
    fn transform_vector_checks_length() {
        let m = Transformation::identity(4);
        assert_eq!(
            m.transform_vector(&vec3(1.0, 2.0, 3.0)),
            Err(MathError::DimensionMismatch { expected: 4, found: 3 })
        );
    }

    #[test]
    fn cols_array_is_column_major() {
        let t = Transformation::translate(&vec3(1.0, 2.0, 3.0));
        let flat = t.to_cols_array();
        assert_abs_diff_eq!(flat[12], 1.0);
        assert_abs_diff_eq!(flat[13], 2.0);
        assert_abs_diff_eq!(flat[14], 3.0);
    }
}
