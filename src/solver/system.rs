//! Mesh matrix assembly and dense LU solving.

use serde::Serialize;

use crate::circuit::CircuitParameters;
use crate::error::{MeshError, Result};

/// Number of meshes (and unknowns) in the circuit.
pub const MESH_COUNT: usize = 3;

/// Pivots smaller than this are treated as exact zeros during factoring.
const PIVOT_EPSILON: f64 = 1e-15;

/// Mesh equation system A·I = B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshSystem {
    /// Coefficient matrix A (self resistance on the diagonal, shared
    /// resistance negated off the diagonal)
    #[serde(rename = "matrix_A")]
    pub a: [[f64; MESH_COUNT]; MESH_COUNT],
    /// Source vector B
    #[serde(rename = "vector_B")]
    pub b: [f64; MESH_COUNT],
}

impl MeshSystem {
    /// Assemble the system for the given parameters.
    ///
    /// No validation happens here; see [`MeshSolver`](super::MeshSolver).
    ///
    /// ```text
    /// A = [ R1+R4+R6   -R4        -R6      ]
    ///     [ -R4         R2+R4+R5  -R5      ]
    ///     [ -R6        -R5         R3+R5+R6]
    /// B = [ V1, V2, V3 ]
    /// ```
    pub fn build(p: &CircuitParameters) -> Self {
        Self {
            a: [
                [p.r1 + p.r4 + p.r6, -p.r4, -p.r6],
                [-p.r4, p.r2 + p.r4 + p.r5, -p.r5],
                [-p.r6, -p.r5, p.r3 + p.r5 + p.r6],
            ],
            b: [p.v1, p.v2, p.v3],
        }
    }

    /// Determinant of A by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let a = &self.a;
        a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])
    }

    /// Whether A equals its transpose.
    pub fn is_symmetric(&self) -> bool {
        (0..MESH_COUNT).all(|i| (0..MESH_COUNT).all(|j| self.a[i][j] == self.a[j][i]))
    }

    /// Compute A·x.
    pub fn apply(&self, x: &[f64; MESH_COUNT]) -> [f64; MESH_COUNT] {
        let mut out = [0.0; MESH_COUNT];
        for (i, row) in self.a.iter().enumerate() {
            out[i] = row.iter().zip(x).map(|(a, x)| a * x).sum();
        }
        out
    }

    /// Compute the residual B - A·x.
    pub fn residual(&self, x: &[f64; MESH_COUNT]) -> [f64; MESH_COUNT] {
        let ax = self.apply(x);
        let mut r = [0.0; MESH_COUNT];
        for i in 0..MESH_COUNT {
            r[i] = self.b[i] - ax[i];
        }
        r
    }

    /// Perform LU decomposition of A with partial pivoting.
    pub fn factor(&self) -> Result<LuFactors> {
        let n = MESH_COUNT;
        let mut lu = self.a;
        let mut pivots = [0, 1, 2];

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k][k].abs();
            let mut max_row = k;
            for (i, row) in lu.iter().enumerate().skip(k + 1) {
                let val = row[k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if !max_val.is_finite() {
                return Err(MeshError::solve_failure(format!(
                    "non-finite coefficient in column {}",
                    k + 1
                )));
            }
            if max_val < PIVOT_EPSILON {
                return Err(MeshError::solve_failure(format!(
                    "zero pivot in column {}",
                    k + 1
                )));
            }

            if max_row != k {
                pivots.swap(k, max_row);
                lu.swap(k, max_row);
            }

            // Eliminate
            let pivot = lu[k][k];
            for i in (k + 1)..n {
                let factor = lu[i][k] / pivot;
                lu[i][k] = factor;
                for j in (k + 1)..n {
                    lu[i][j] -= factor * lu[k][j];
                }
            }
        }

        Ok(LuFactors { lu, pivots })
    }

    /// Solve A·x = B by LU decomposition.
    pub fn solve(&self) -> Result<[f64; MESH_COUNT]> {
        let x = self.factor()?.solve(&self.b);

        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::solve_failure(format!(
                "numerical overflow in mesh current I{}",
                i + 1
            )));
        }
        Ok(x)
    }
}

/// Packed LU factors of a 3×3 matrix with the row permutation applied.
#[derive(Debug, Clone, Copy)]
pub struct LuFactors {
    lu: [[f64; MESH_COUNT]; MESH_COUNT],
    pivots: [usize; MESH_COUNT],
}

impl LuFactors {
    /// Solve for one right-hand side using the stored factors.
    pub fn solve(&self, b: &[f64; MESH_COUNT]) -> [f64; MESH_COUNT] {
        let n = MESH_COUNT;
        let mut x = [0.0; MESH_COUNT];

        // Apply pivot permutation to b
        for i in 0..n {
            x[i] = b[self.pivots[i]];
        }

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i][j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i][j] * x[j];
            }
            x[i] /= self.lu[i][i];
        }

        x
    }

    /// Determinant recovered from the factors (product of U's diagonal,
    /// sign-corrected for row swaps).
    pub fn determinant(&self) -> f64 {
        let mut det: f64 = (0..MESH_COUNT).map(|i| self.lu[i][i]).product();
        let mut perm = self.pivots;
        for i in 0..MESH_COUNT {
            while perm[i] != i {
                let target = perm[i];
                perm.swap(i, target);
                det = -det;
            }
        }
        det
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::RESIDENTIAL_DEFAULT;
    use approx::assert_relative_eq;

    fn params(r: [f64; 6], v: [f64; 3]) -> CircuitParameters {
        CircuitParameters::new(r, v)
    }

    /// Cramer's rule, independent of the LU path.
    fn cramer(system: &MeshSystem) -> [f64; 3] {
        let det = system.determinant();
        let mut x = [0.0; 3];
        for (col, xi) in x.iter_mut().enumerate() {
            let mut replaced = *system;
            for row in 0..3 {
                replaced.a[row][col] = system.b[row];
            }
            *xi = replaced.determinant() / det;
        }
        x
    }

    #[test]
    fn test_matrix_structure() {
        let p = params([1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [10.0, 20.0, 30.0]);
        let system = MeshSystem::build(&p);

        assert!(system.is_symmetric());
        assert_eq!(system.a[0], [11.0, -4.0, -6.0]);
        assert_eq!(system.a[1], [-4.0, 11.0, -5.0]);
        assert_eq!(system.a[2], [-6.0, -5.0, 14.0]);
        assert_eq!(system.b, [10.0, 20.0, 30.0]);

        // Diagonal minus the magnitude of the couplings leaves the own branch.
        let own = [p.r1, p.r2, p.r3];
        for i in 0..3 {
            let shared: f64 = (0..3).filter(|&j| j != i).map(|j| -system.a[i][j]).sum();
            assert!((0..3).filter(|&j| j != i).all(|j| system.a[i][j] <= 0.0));
            assert_eq!(system.a[i][i], own[i] + shared);
        }
    }

    #[test]
    fn test_default_solution_matches_cramer() {
        let system = MeshSystem::build(&RESIDENTIAL_DEFAULT);
        let lu = system.solve().unwrap();
        let reference = cramer(&system);

        for i in 0..3 {
            assert_relative_eq!(lu[i], reference[i], max_relative = 1e-9);
        }
        for r in system.residual(&lu) {
            assert!(r.abs() < 1e-9);
        }
    }

    #[test]
    fn test_lu_determinant_matches_cofactor() {
        let system = MeshSystem::build(&params([0.3, 12.0, 7.5, 40.0, 2.0, 90.0], [1.0, 1.0, 1.0]));
        let factors = system.factor().unwrap();
        assert_relative_eq!(factors.determinant(), system.determinant(), max_relative = 1e-12);
    }

    #[test]
    fn test_trivial_solution_without_coupling() {
        let system = MeshSystem::build(&params([3.0, 3.0, 3.0, 0.0, 0.0, 0.0], [0.0; 3]));
        assert_ne!(system.determinant(), 0.0);

        let x = system.solve().unwrap();
        assert_eq!(x, [0.0, 0.0, 0.0]);
        assert_eq!(system.apply(&x), system.b);
    }

    #[test]
    fn test_zero_pivot_is_solve_failure() {
        // Pure coupling with no branch resistance: every row sums to zero.
        let system = MeshSystem::build(&params([0.0, 0.0, 0.0, 1.0, 1.0, 1.0], [1.0; 3]));
        assert!(matches!(system.solve(), Err(MeshError::SolveFailure { .. })));
    }

    #[test]
    fn test_overflow_is_solve_failure() {
        let system = MeshSystem::build(&params([1e-10, 1e-10, 1e-10, 0.0, 0.0, 0.0], [1e300; 3]));
        assert!(matches!(system.solve(), Err(MeshError::SolveFailure { .. })));
    }
}
