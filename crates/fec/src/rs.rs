//! Systematic Reed-Solomon (255,223) codec.
//!
//! The codeword places the 223 data symbols at positions [0, 223) and the
//! 32 parity symbols at [223, 255), with the symbol at position j carrying
//! the coefficient of x^j. Decoding runs syndromes, Berlekamp-Massey,
//! Chien search and Forney correction, and can repair up to 16 symbol
//! errors per block.

use crate::gf::GaloisField;
use crate::{FecError, Result};

/// Codeword length in symbols.
pub const BLOCK_LEN: usize = 255;
/// Information symbols per codeword.
pub const DATA_LEN: usize = 223;
/// Parity symbols per codeword.
pub const PARITY_LEN: usize = 32;
/// Maximum correctable symbol errors per codeword.
pub const MAX_ERRORS: usize = 16;

/// Outcome of a successful block decode.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The corrected codeword.
    pub block: [u8; BLOCK_LEN],
    /// Number of symbol errors corrected (0 for a clean block).
    pub corrected: usize,
}

/// Immutable Reed-Solomon codec context.
///
/// Owns the GF(2^8) lookup tables and the generator polynomial. Build it
/// once at startup and share it by reference; decoding holds no state
/// between blocks, so a single context serves any number of threads.
#[derive(Debug, Clone)]
pub struct RsCodec {
    gf: GaloisField,
    /// g(x) = (x - alpha^0)(x - alpha^1)...(x - alpha^31), coefficients
    /// stored low-to-high; monic of degree 32.
    generator: [u8; PARITY_LEN + 1],
}

impl RsCodec {
    pub fn new() -> Self {
        let gf = GaloisField::new();

        let mut generator = [0u8; PARITY_LEN + 1];
        generator[0] = 1;
        for i in 0..PARITY_LEN {
            let root = gf.pow(2, i);
            // Multiply the running product by (x - alpha^i).
            for j in (1..=i + 1).rev() {
                generator[j] = generator[j - 1] ^ gf.mul(generator[j], root);
            }
            generator[0] = gf.mul(generator[0], root);
        }

        RsCodec { gf, generator }
    }

    /// The field arithmetic backing this codec.
    pub fn field(&self) -> &GaloisField {
        &self.gf
    }

    /// Systematic encode: copies the data block into positions [0, 223)
    /// and appends 32 parity symbols.
    ///
    /// The parity is the remainder of x^32 * d(x) modulo g(x), where
    /// d(x) = sum data[j] * x^j. The division register consumes the block
    /// from its highest position down, matching the position/coefficient
    /// mapping used by the syndrome computation.
    pub fn encode_block(&self, data: &[u8; DATA_LEN]) -> [u8; BLOCK_LEN] {
        let mut codeword = [0u8; BLOCK_LEN];
        codeword[..DATA_LEN].copy_from_slice(data);

        let mut remainder = [0u8; PARITY_LEN];
        for &symbol in data.iter().rev() {
            let feedback = symbol ^ remainder[PARITY_LEN - 1];
            for j in (1..PARITY_LEN).rev() {
                remainder[j] = remainder[j - 1] ^ self.gf.mul(self.generator[j], feedback);
            }
            remainder[0] = self.gf.mul(self.generator[0], feedback);
        }

        codeword[DATA_LEN..].copy_from_slice(&remainder);
        codeword
    }

    /// Decode one received block, correcting up to [`MAX_ERRORS`] symbol
    /// errors in place. Returns the corrected block and the number of
    /// corrections, or [`FecError::Uncorrectable`] when the error pattern
    /// exceeds the code's capability or the decode is inconsistent.
    pub fn decode_block(&self, received: &[u8; BLOCK_LEN]) -> Result<Decoded> {
        let gf = &self.gf;

        // Syndromes: S_i = sum_j r[j] * alpha^(i*j), evaluated by Horner
        // from the top position down.
        let mut syndromes = [0u8; PARITY_LEN];
        let mut clean = true;
        for (i, syndrome) in syndromes.iter_mut().enumerate() {
            let x = gf.pow(2, i);
            let mut acc = 0u8;
            for &r in received.iter().rev() {
                acc = gf.mul(acc, x) ^ r;
            }
            *syndrome = acc;
            clean &= acc == 0;
        }
        if clean {
            return Ok(Decoded {
                block: *received,
                corrected: 0,
            });
        }

        let (lambda, deg_lambda) = self.error_locator(&syndromes);
        if deg_lambda == 0 {
            // Nonzero syndromes but a degree-zero locator: report the
            // block clean rather than guessing at corrections.
            return Ok(Decoded {
                block: *received,
                corrected: 0,
            });
        }
        if deg_lambda > MAX_ERRORS {
            return Err(FecError::Uncorrectable {
                msg: format!("locator degree {deg_lambda} exceeds capability {MAX_ERRORS}"),
            });
        }

        // Error evaluator: Omega(x) = S(x) * Lambda(x) mod x^32.
        let mut omega = [0u8; PARITY_LEN];
        for (i, coeff) in omega.iter_mut().enumerate() {
            let mut acc = 0u8;
            for j in 0..=deg_lambda.min(i) {
                acc ^= gf.mul(lambda[j], syndromes[i - j]);
            }
            *coeff = acc;
        }

        // Chien search over every position, applying Forney's formula at
        // each located root.
        let mut block = *received;
        let mut found = 0usize;
        for pos in 0..BLOCK_LEN {
            let x_inv = gf.exp[255 - pos]; // alpha^(-pos)

            let mut value = lambda[deg_lambda];
            for j in (0..deg_lambda).rev() {
                value = gf.mul(value, x_inv) ^ lambda[j];
            }
            if value != 0 {
                continue;
            }

            found += 1;
            if found > MAX_ERRORS {
                return Err(FecError::Uncorrectable {
                    msg: format!("more than {MAX_ERRORS} error locations"),
                });
            }

            // e = X * Omega(1/X) / Lambda'(1/X) with X = alpha^pos; the
            // leading X factor belongs to the first-root-zero convention.
            let mut omega_val = omega[PARITY_LEN - 1];
            for j in (0..PARITY_LEN - 1).rev() {
                omega_val = gf.mul(omega_val, x_inv) ^ omega[j];
            }

            // Formal derivative: only odd powers survive in GF(2^m).
            let mut derivative = 0u8;
            let mut j = 1;
            while j <= deg_lambda {
                derivative ^= gf.mul(lambda[j], gf.pow(x_inv, j - 1));
                j += 2;
            }
            if derivative == 0 {
                // A genuine locator of distinct positions cannot have a
                // repeated root; refuse the correction.
                return Err(FecError::Uncorrectable {
                    msg: format!("zero locator derivative at position {pos}"),
                });
            }

            let magnitude = gf.mul(gf.pow(2, pos), gf.div(omega_val, derivative));
            block[pos] ^= magnitude;
        }

        if found != deg_lambda {
            return Err(FecError::Uncorrectable {
                msg: format!("{found} error locations for locator degree {deg_lambda}"),
            });
        }

        Ok(Decoded {
            block,
            corrected: found,
        })
    }

    /// Berlekamp-Massey over the 32 syndromes. Returns the error locator
    /// Lambda(x) (coefficients low-to-high) and its degree.
    fn error_locator(&self, syndromes: &[u8; PARITY_LEN]) -> ([u8; PARITY_LEN + 1], usize) {
        let gf = &self.gf;

        let mut lambda = [0u8; PARITY_LEN + 1];
        let mut prev = [0u8; PARITY_LEN + 1];
        lambda[0] = 1;
        prev[0] = 1;

        let mut deg = 0usize; // current locator degree
        let mut shift = 1usize; // power of x applied to the previous iterate
        let mut prev_disc = 1u8; // discrepancy at the last degree change

        for n in 0..PARITY_LEN {
            let mut disc = syndromes[n];
            for i in 1..=deg {
                disc ^= gf.mul(lambda[i], syndromes[n - i]);
            }
            if disc == 0 {
                shift += 1;
                continue;
            }

            let coef = gf.div(disc, prev_disc);
            if 2 * deg <= n {
                let snapshot = lambda;
                for i in 0..=PARITY_LEN - shift {
                    lambda[i + shift] ^= gf.mul(coef, prev[i]);
                }
                deg = n + 1 - deg;
                prev = snapshot;
                prev_disc = disc;
                shift = 1;
            } else {
                for i in 0..=PARITY_LEN - shift {
                    lambda[i + shift] ^= gf.mul(coef, prev[i]);
                }
                shift += 1;
            }
        }

        (lambda, deg)
    }
}

impl Default for RsCodec {
    fn default() -> Self {
        Self::new()
    }
}
