use ndarray::{ArrayD, IxDyn, ShapeError};

/// A decoded n-dimensional array with its element type erased.
///
/// Axis order follows the positional TCZYX convention; axes are not labeled.
/// Decoders normally produce [`ArrayData::U16`], while `.npy` files keep the
/// dtype they were saved with: any (u)int(8/16/32/64) or float(32/64).
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

macro_rules! impl_array_cast {
    ($t:ty, $variant:ident) => {
        impl From<ArrayD<$t>> for ArrayData {
            fn from(array: ArrayD<$t>) -> Self {
                ArrayData::$variant(array)
            }
        }
    };
}

impl_array_cast!(u8, U8);
impl_array_cast!(u16, U16);
impl_array_cast!(u32, U32);
impl_array_cast!(u64, U64);
impl_array_cast!(i8, I8);
impl_array_cast!(i16, I16);
impl_array_cast!(i32, I32);
impl_array_cast!(i64, I64);
impl_array_cast!(f32, F32);
impl_array_cast!(f64, F64);

macro_rules! for_each_variant {
    ($self:expr, $array:ident => $body:expr) => {
        match $self {
            ArrayData::U8($array) => $body,
            ArrayData::U16($array) => $body,
            ArrayData::U32($array) => $body,
            ArrayData::U64($array) => $body,
            ArrayData::I8($array) => $body,
            ArrayData::I16($array) => $body,
            ArrayData::I32($array) => $body,
            ArrayData::I64($array) => $body,
            ArrayData::F32($array) => $body,
            ArrayData::F64($array) => $body,
        }
    };
}

impl ArrayData {
    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        for_each_variant!(self, a => a.ndim())
    }

    /// Shape as a slice of axis lengths.
    pub fn shape(&self) -> &[usize] {
        for_each_variant!(self, a => a.shape())
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        for_each_variant!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the element type is an integer type.
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::F32(_) | Self::F64(_))
    }

    /// Reshape to `shape` without changing element order. Fails if the
    /// element counts disagree.
    pub fn into_shape(self, shape: &[usize]) -> Result<Self, ShapeError> {
        for_each_variant!(self, a => {
            a.into_shape_with_order(IxDyn(shape)).map(Self::from)
        })
    }

    /// Convert to an integer array suitable for a labels layer.
    ///
    /// Integer variants are passed through unchanged; floating-point values
    /// are truncated into `i64`.
    pub fn into_labels(self) -> Self {
        match self {
            Self::F32(a) => Self::I64(a.mapv(|v| v as i64)),
            Self::F64(a) => Self::I64(a.mapv(|v| v as i64)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn reshape_preserves_order() {
        let flat: ArrayData = Array::from_vec((0u16..6).collect::<Vec<_>>())
            .into_dyn()
            .into();
        let reshaped = flat.into_shape(&[2, 3]).unwrap();
        assert_eq!(reshaped.shape(), &[2, 3]);
        assert_eq!(
            reshaped,
            ArrayData::U16(
                Array::from_shape_vec(IxDyn(&[2, 3]), (0u16..6).collect()).unwrap()
            )
        );
    }

    #[test]
    fn reshape_rejects_wrong_size() {
        let flat: ArrayData = Array::from_vec(vec![0u8; 5]).into_dyn().into();
        assert!(flat.into_shape(&[2, 3]).is_err());
    }

    #[test]
    fn labels_cast_truncates_floats() {
        let floats: ArrayData = Array::from_vec(vec![0.2f32, 1.9, 3.0])
            .into_dyn()
            .into();
        let labels = floats.into_labels();
        assert!(labels.is_integer());
        assert_eq!(
            labels,
            ArrayData::I64(Array::from_vec(vec![0i64, 1, 3]).into_dyn())
        );
    }

    #[test]
    fn labels_cast_keeps_integers() {
        let ints: ArrayData = Array::from_vec(vec![1u16, 2, 3]).into_dyn().into();
        assert_eq!(ints.clone().into_labels(), ints);

        let wide: ArrayData = Array::from_vec(vec![1u32, 2, 3]).into_dyn().into();
        assert!(wide.is_integer());
        assert_eq!(wide.clone().into_labels(), wide);
    }
}
