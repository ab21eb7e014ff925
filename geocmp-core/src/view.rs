use crate::basemap::BaseMapState;
use crate::model::LayerId;
use serde::Serialize;

/// One row of the layer list, in presentation order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub id: LayerId,
    pub name: String,
    pub hotkey: Option<char>,
    pub enabled: bool,
    pub active: bool,
    pub failed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InfoPanel {
    pub name: String,
    pub source: String,
    pub features: usize,
}

/// Everything the list widget and panels need to re-render.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub entries: Vec<ListEntry>,
    pub active: Option<LayerId>,
    pub info: Option<InfoPanel>,
    pub opacity: f64,
    pub base_map: BaseMapState,
    pub info_visible: bool,
    pub help_visible: bool,
}
