use crate::basemap::BaseLayer;
use crate::model::{Bounds, FeatureOpacity, FeatureStyle, LayerId};
use geojson::FeatureCollection;
use serde::Serialize;

/// Per-feature rendering input, in feature order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureRender {
    pub style: FeatureStyle,
    pub popup: String,
}

/// The map library behind the controller. Implementations own the drawn
/// representation; the controller only holds the returned handles.
pub trait MapSurface {
    type Overlay;

    /// Builds a layer's overlay without adding it to the map.
    fn build_overlay(
        &mut self,
        id: LayerId,
        data: &FeatureCollection,
        features: &[FeatureRender],
    ) -> Result<Self::Overlay, String>;

    fn show(&mut self, overlay: &Self::Overlay);

    fn hide(&mut self, overlay: &Self::Overlay);

    /// Detaches the overlay from the map and releases it.
    fn destroy(&mut self, overlay: Self::Overlay);

    /// Applies per-feature opacities, in feature order.
    fn restyle(&mut self, overlay: &Self::Overlay, opacities: &[FeatureOpacity]);

    fn fit_bounds(&mut self, bounds: Bounds, padding: u32);

    fn set_base_layer(&mut self, layer: &BaseLayer);

    fn set_base_opacity(&mut self, opacity: f64);

    fn set_background(&mut self, color: &str);
}
