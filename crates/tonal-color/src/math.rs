// ABOUTME: Small numeric helpers shared by the color transforms
// ABOUTME: 3x3 matrix products, sign, interpolation and angle normalization

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

/// -1, 0 or 1 by sign. Unlike `f64::signum`, zero maps to zero.
#[inline]
pub fn signum(num: f64) -> f64 {
    if num < 0.0 {
        -1.0
    } else if num == 0.0 {
        0.0
    } else {
        1.0
    }
}

#[inline]
pub fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * stop
}

/// Normalize an angle in degrees into [0, 360).
#[inline]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let degrees = degrees % 360.0;
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    // -tiny % 360 + 360 rounds to 360.0
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Matrix times column vector: `out[i] = sum_j m[i][j] * row[j]`.
#[inline]
pub fn matrix_multiply(row: Vec3, matrix: &Mat3) -> Vec3 {
    [
        row[0] * matrix[0][0] + row[1] * matrix[0][1] + row[2] * matrix[0][2],
        row[0] * matrix[1][0] + row[1] * matrix[1][1] + row[2] * matrix[1][2],
        row[0] * matrix[2][0] + row[1] * matrix[2][1] + row[2] * matrix[2][2],
    ]
}

/// Matrix product `a * b`.
pub fn matrix_product(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Inverse by cofactor expansion. Returns `None` for singular input.
pub fn matrix_inverse(m: &Mat3) -> Option<Mat3> {
    let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
    let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
    if det.abs() < f64::EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    Some([
        [
            c00 * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            c01 * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            c02 * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ])
}

/// Scale row `i` of `m` by `factors[i]`, i.e. `diag(factors) * m`.
pub fn scale_rows(factors: Vec3, m: &Mat3) -> Mat3 {
    let mut out = *m;
    for (row, factor) in out.iter_mut().zip(factors) {
        for cell in row.iter_mut() {
            *cell *= factor;
        }
    }
    out
}
