//! Vector register width tiers.

use std::fmt;

/// One of the target's vector register capacities, ordered by byte size.
///
/// Element counts are always derived as `bytes() / element_bytes` and are
/// powers of two by construction (16/32/64 divided by 1/2/4/8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VectorWidth {
    /// 128-bit XMM register.
    Xmm,
    /// 256-bit YMM register.
    Ymm,
    /// 512-bit ZMM register.
    Zmm,
}

impl VectorWidth {
    /// All tiers, widest first — the resolver's walk order.
    pub const WIDEST_FIRST: [VectorWidth; 3] =
        [VectorWidth::Zmm, VectorWidth::Ymm, VectorWidth::Xmm];

    /// Register capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            VectorWidth::Xmm => 16,
            VectorWidth::Ymm => 32,
            VectorWidth::Zmm => 64,
        }
    }

    /// Register capacity in bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }
}

impl fmt::Display for VectorWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorWidth::Xmm => f.write_str("xmm"),
            VectorWidth::Ymm => f.write_str("ymm"),
            VectorWidth::Zmm => f.write_str("zmm"),
        }
    }
}
