//! Plain data types shared with C callers.

/// Coordinates of a single pixel, laid out like a C `struct { size_t x; size_t y; }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct Pixel {
    /// Column, counted from the left edge.
    pub x: usize,
    /// Row, counted from the top edge.
    pub y: usize,
}

impl Pixel {
    /// Create a pixel coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Key that sorts pixels in row-major scan order.
    #[must_use]
    pub const fn scan_key(self) -> (usize, usize) {
        (self.y, self.x)
    }
}

/// How two image layers are combined when compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum CompositeOperator {
    Undefined = 0,
    Over = 1,
    Src = 2,
    Copy = 3,
    Replace = 4,
    Dst = 5,
    Clear = 6,
    Multiply = 7,
    Screen = 8,
    Difference = 9,
    Blend = 10,
    Atop = 11,
}

impl TryFrom<i32> for CompositeOperator {
    type Error = i32;

    fn try_from(raw: i32) -> std::result::Result<Self, Self::Error> {
        Ok(match raw {
            0 => Self::Undefined,
            1 => Self::Over,
            2 => Self::Src,
            3 => Self::Copy,
            4 => Self::Replace,
            5 => Self::Dst,
            6 => Self::Clear,
            7 => Self::Multiply,
            8 => Self::Screen,
            9 => Self::Difference,
            10 => Self::Blend,
            11 => Self::Atop,
            other => return Err(other),
        })
    }
}

/// How the alpha channel of an image is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum AlphaChannelOption {
    Undefined = 0,
    Activate = 1,
    Associate = 2,
    Background = 3,
    Copy = 4,
    Deactivate = 5,
    Discrete = 6,
    Disassociate = 7,
    Extract = 8,
    Off = 9,
    On = 10,
    Opaque = 11,
    Remove = 12,
    Set = 13,
    Shape = 14,
    Transparent = 15,
}

impl TryFrom<i32> for AlphaChannelOption {
    type Error = i32;

    fn try_from(raw: i32) -> std::result::Result<Self, Self::Error> {
        Ok(match raw {
            0 => Self::Undefined,
            1 => Self::Activate,
            2 => Self::Associate,
            3 => Self::Background,
            4 => Self::Copy,
            5 => Self::Deactivate,
            6 => Self::Discrete,
            7 => Self::Disassociate,
            8 => Self::Extract,
            9 => Self::Off,
            10 => Self::On,
            11 => Self::Opaque,
            12 => Self::Remove,
            13 => Self::Set,
            14 => Self::Shape,
            15 => Self::Transparent,
            other => return Err(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_layout_matches_two_size_t() {
        assert_eq!(
            std::mem::size_of::<Pixel>(),
            2 * std::mem::size_of::<usize>()
        );
    }

    #[test]
    fn scan_key_orders_rows_before_columns() {
        let mut pixels = vec![Pixel::new(1, 1), Pixel::new(5, 0), Pixel::new(0, 1)];
        pixels.sort_by_key(|p| p.scan_key());
        assert_eq!(
            pixels,
            vec![Pixel::new(5, 0), Pixel::new(0, 1), Pixel::new(1, 1)]
        );
    }

    #[test]
    fn enums_round_trip_through_raw_values() {
        assert_eq!(
            CompositeOperator::try_from(CompositeOperator::Src as i32),
            Ok(CompositeOperator::Src)
        );
        assert_eq!(
            AlphaChannelOption::try_from(AlphaChannelOption::On as i32),
            Ok(AlphaChannelOption::On)
        );
    }

    #[test]
    fn unknown_raw_values_are_rejected() {
        assert_eq!(CompositeOperator::try_from(-1), Err(-1));
        assert_eq!(CompositeOperator::try_from(12), Err(12));
        assert_eq!(AlphaChannelOption::try_from(16), Err(16));
    }
}
