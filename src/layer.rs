use crate::array_data::ArrayData;
use crate::enums::LayerKind;

/// Display options attached to a layer. Holds at most a display name and an
/// optional channel-axis index; everything else is the viewer's business.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerOptions {
    /// Display name, defaulting to the source path's final component.
    pub name: Option<String>,
    /// Array axis the viewer should interpret as color/imaging channels.
    pub channel_axis: Option<usize>,
}

/// One displayable unit handed to the host viewer: an array, its display
/// options, and the layer kind. Constructed per input path and never mutated
/// afterwards; the caller owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub data: ArrayData,
    pub options: LayerOptions,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(data: ArrayData, options: LayerOptions, kind: LayerKind) -> Self {
        Self {
            data,
            options,
            kind,
        }
    }

    /// Number of non-degenerate array dimensions not claimed by the channel
    /// axis.
    ///
    /// A 3-D array with channel axis 0 is a set of 2-D planes, not a volume,
    /// and size-1 axes do not count: a minimal TCZYX export of a single
    /// plane, `(1, 1, 1, Y, X)`, is still 2-D data.
    pub fn spatial_ndim(&self) -> usize {
        self.data
            .shape()
            .iter()
            .enumerate()
            .filter(|&(axis, &len)| Some(axis) != self.options.channel_axis && len > 1)
            .count()
    }

    /// Whether the layer spans three or more non-channel dimensions, e.g. a
    /// z-stack or a time series of planes.
    pub fn is_volumetric(&self) -> bool {
        self.spatial_ndim() >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn layer(shape: &[usize], channel_axis: Option<usize>) -> Layer {
        Layer::new(
            ArrayData::U16(ArrayD::zeros(ndarray::IxDyn(shape))),
            LayerOptions {
                name: None,
                channel_axis,
            },
            LayerKind::Image,
        )
    }

    #[test]
    fn volumetric_ignores_channel_axis() {
        assert!(!layer(&[512, 512], None).is_volumetric());
        assert!(!layer(&[3, 512, 512], Some(0)).is_volumetric());
        assert!(layer(&[40, 512, 512], None).is_volumetric());
        assert!(layer(&[2, 40, 512, 512], Some(0)).is_volumetric());
    }

    #[test]
    fn volumetric_ignores_degenerate_axes() {
        // Minimal TCZYX export of one plane
        assert!(!layer(&[1, 1, 1, 512, 512], Some(1)).is_volumetric());
        assert!(!layer(&[1, 1, 1, 512, 512], None).is_volumetric());
        assert!(layer(&[1, 1, 40, 512, 512], Some(1)).is_volumetric());
    }
}
