//! Seeded 3D simplex gradient noise
//!
//! The permutation table is owned by the instance and built from an
//! explicit seed, so noise output is reproducible and two fields never
//! share hidden state.

use cinder_core::Rng32;

/// Skew/unskew constants for 3D simplex cells
const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;

/// The 12 edge-midpoint gradients of a cube
const GRAD3: [[f32; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// 3D simplex noise with an explicitly seeded gradient permutation.
pub struct SimplexNoise {
    /// 256-entry shuffled identity permutation, doubled to 512 so corner
    /// lookups never need an index-wrap branch.
    perm: [u8; 512],
}

impl SimplexNoise {
    pub fn with_seed(seed: u32) -> Self {
        let mut table: [u8; 256] = [0; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }

        // Fisher-Yates shuffle driven by the deterministic xorshift PRNG
        let mut rng = Rng32::new(seed);
        for i in (1..256usize).rev() {
            let j = (rng.next_u32() as usize) % (i + 1);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = table[i & 255];
        }
        Self { perm }
    }

    /// Evaluate the noise at a 3D point. Output is a continuous value in
    /// approximately [-1, 1].
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        // Skew input space to find the containing simplex cell
        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();

        // Unskew back to get the cell origin's displacement
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Rank the displacement components to pick which of the six
        // tetrahedra inside the cell the point falls in
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f32 + G3;
        let y1 = y0 - j1 as f32 + G3;
        let z1 = z0 - k1 as f32 + G3;
        let x2 = x0 - i2 as f32 + 2.0 * G3;
        let y2 = y0 - j2 as f32 + 2.0 * G3;
        let z2 = z0 - k2 as f32 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let kk = (k as i32 & 255) as usize;

        let gi0 = self.perm[ii + self.perm[jj + self.perm[kk] as usize] as usize] as usize % 12;
        let gi1 = self.perm
            [ii + i1 + self.perm[jj + j1 + self.perm[kk + k1] as usize] as usize]
            as usize
            % 12;
        let gi2 = self.perm
            [ii + i2 + self.perm[jj + j2 + self.perm[kk + k2] as usize] as usize]
            as usize
            % 12;
        let gi3 = self.perm[ii + 1 + self.perm[jj + 1 + self.perm[kk + 1] as usize] as usize]
            as usize
            % 12;

        let n0 = corner(gi0, x0, y0, z0);
        let n1 = corner(gi1, x1, y1, z1);
        let n2 = corner(gi2, x2, y2, z2);
        let n3 = corner(gi3, x3, y3, z3);

        // 32 scales the summed contributions to roughly [-1, 1]
        32.0 * (n0 + n1 + n2 + n3)
    }
}

/// Quartic falloff kernel for one contributing simplex corner
fn corner(gi: usize, x: f32, y: f32, z: f32) -> f32 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let g = &GRAD3[gi];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y + g[2] * z)
    }
}
