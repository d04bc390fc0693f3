//! In-place radix-2 Cooley-Tukey FFT.
//!
//! Only power-of-two sizes are supported. Callers with other sizes should
//! zero-pad to [`usize::next_power_of_two`].

use chopper_core::{Error, Result};

/// Forward FFT of a fixed power-of-two size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radix2Fft {
    size: usize,
}

impl Radix2Fft {
    /// Fails unless `size` is a power of two.
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "FFT size {size} is not a power of two"
            )));
        }
        Ok(Self { size })
    }

    /// FFT of the smallest power-of-two size that holds `size` samples.
    pub fn padded(size: usize) -> Self {
        Self {
            size: size.max(1).next_power_of_two(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `re` + `im` in place.
    ///
    /// # Panics
    /// Panics if either buffer is not exactly `size()` long.
    pub fn process(&self, re: &mut [f32], im: &mut [f32]) {
        let n = self.size;
        assert_eq!(re.len(), n, "real buffer length must equal FFT size");
        assert_eq!(im.len(), n, "imaginary buffer length must equal FFT size");
        if n < 2 {
            return;
        }

        // Bit-reversal permutation
        let mut j = 0usize;
        for i in 1..n {
            let mut bit = n >> 1;
            while j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j ^= bit;
            if i < j {
                re.swap(i, j);
                im.swap(i, j);
            }
        }

        let mut len = 2;
        while len <= n {
            let angle = -2.0 * std::f64::consts::PI / len as f64;
            let (w_re, w_im) = (angle.cos(), angle.sin());
            let half = len / 2;

            for start in (0..n).step_by(len) {
                let (mut cur_re, mut cur_im) = (1.0f64, 0.0f64);
                for k in 0..half {
                    let a = start + k;
                    let b = a + half;
                    let (c_re, c_im) = (cur_re as f32, cur_im as f32);
                    let t_re = re[b] * c_re - im[b] * c_im;
                    let t_im = re[b] * c_im + im[b] * c_re;
                    re[b] = re[a] - t_re;
                    im[b] = im[a] - t_im;
                    re[a] += t_re;
                    im[a] += t_im;

                    let next_re = cur_re * w_re - cur_im * w_im;
                    cur_im = cur_re * w_im + cur_im * w_re;
                    cur_re = next_re;
                }
            }
            len <<= 1;
        }
    }
}
