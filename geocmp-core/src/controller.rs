use crate::basemap::BaseMapState;
use crate::collection;
use crate::config::ViewerConfig;
use crate::dropzone::{self, DropOutcome, DropReport, DroppedFile, DroppedFileResult};
use crate::error::{check_unit_range, GeocmpError, Result};
use crate::fragment;
use crate::keys::{self, KeyAction};
use crate::limits::{OPACITY_MAX, OPACITY_MIN};
use crate::model::{Bounds, FeatureOpacity, LayerId, LayerPayload, LayerState, Viewport};
use crate::style;
use crate::surface::{FeatureRender, MapSurface};
use crate::view::{InfoPanel, ListEntry, ViewState};
use geojson::FeatureCollection;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One data layer. Removed records stay as tombstones so ids are never
/// handed out twice.
#[derive(Debug)]
pub struct LayerRecord<O> {
    pub id: LayerId,
    pub name: String,
    pub source: String,
    pub feature_count: usize,
    pub bounds: Option<Bounds>,
    pub state: LayerState,
    data: Option<FeatureCollection>,
    overlay: Option<O>,
    // Captured on the first opacity application
    base_opacity: Option<Vec<FeatureOpacity>>,
}

impl<O> LayerRecord<O> {
    pub fn has_overlay(&self) -> bool { self.overlay.is_some() }
    pub fn is_live(&self) -> bool { self.state == LayerState::Live }
}

/// A user action, applied synchronously by [`LayerSetController::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddLayer { data: Value, name: String, source: String },
    RemoveLayer(LayerId),
    SetEnabled { id: LayerId, enabled: bool },
    SwitchTo(LayerId),
    CycleNext,
    SetOpacity(f64),
    SelectBaseLayer(String),
    SetBaseOpacity(f64),
    ToggleBackground,
    ToggleInfo,
    ToggleHelp,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<LayerId>,
    pub failed: Vec<(LayerId, String)>,
}

/// Owns the layer set and keeps the surface in step with it.
pub struct LayerSetController<S: MapSurface> {
    surface: S,
    config: ViewerConfig,
    records: Vec<LayerRecord<S::Overlay>>, // ascending id
    enabled: BTreeSet<LayerId>,
    active: Option<LayerId>,
    order: Vec<LayerId>, // presentation order
    next_id: LayerId,
    opacity: f64,
    base_map: BaseMapState,
    info_visible: bool,
    help_visible: bool,
}

impl<S: MapSurface> LayerSetController<S> {
    pub fn new(surface: S, config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let base_map = BaseMapState::new(&config.default_base_layer);
        let mut ctl = LayerSetController {
            surface,
            config,
            records: Vec::new(),
            enabled: BTreeSet::new(),
            active: None,
            order: Vec::new(),
            next_id: 1,
            opacity: 1.0,
            base_map,
            info_visible: true,
            help_visible: false,
        };
        if let Some(base) = ctl.config.base_layer(&ctl.base_map.selected) {
            ctl.surface.set_base_layer(base);
        }
        ctl.surface.set_background(ctl.base_map.background_color());
        Ok(ctl)
    }

    // Accessors

    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn config(&self) -> &ViewerConfig { &self.config }
    pub fn active(&self) -> Option<LayerId> { self.active }
    pub fn opacity(&self) -> f64 { self.opacity }
    pub fn base_map(&self) -> &BaseMapState { &self.base_map }
    pub fn order(&self) -> &[LayerId] { &self.order }
    pub fn is_enabled(&self, id: LayerId) -> bool { self.enabled.contains(&id) }
    pub fn enabled(&self) -> impl Iterator<Item = LayerId> + '_ { self.enabled.iter().copied() }

    /// Number of records ever created, tombstones included.
    pub fn record_count(&self) -> usize { self.records.len() }

    /// Number of layers still listed (live or failed).
    pub fn layer_count(&self) -> usize { self.order.len() }

    pub fn record(&self, id: LayerId) -> Option<&LayerRecord<S::Overlay>> {
        self.index_of(id).map(|i| &self.records[i])
    }

    pub fn records(&self) -> impl Iterator<Item = &LayerRecord<S::Overlay>> { self.records.iter() }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.records.binary_search_by_key(&id, |r| r.id).ok()
    }

    fn alloc_id(&mut self) -> LayerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn build(&mut self, id: LayerId, fc: &FeatureCollection) -> Result<S::Overlay> {
        let features: Vec<FeatureRender> = fc
            .features
            .iter()
            .map(|f| FeatureRender { style: style::feature_style(f), popup: style::popup_html(f.properties.as_ref()) })
            .collect();
        self.surface.build_overlay(id, fc, &features).map_err(GeocmpError::Overlay)
    }

    // Loading

    /// Inserts the initial payload. Entries that fail stay listed as failed
    /// layers; the rest of the batch is unaffected. Afterwards the first
    /// live layer becomes active and the map is fitted to it.
    pub fn load(&mut self, payload: Vec<LayerPayload>) -> LoadReport {
        let mut report = LoadReport::default();
        for entry in payload {
            let id = self.alloc_id();
            let built = collection::parse_value(entry.data).and_then(|fc| {
                let overlay = self.build(id, &fc)?;
                Ok((fc, overlay))
            });
            match built {
                Ok((fc, overlay)) => {
                    let record = LayerRecord {
                        id,
                        name: entry.name,
                        source: entry.source,
                        feature_count: fc.features.len(),
                        bounds: collection::bounds(&fc),
                        state: LayerState::Live,
                        data: Some(fc),
                        overlay: Some(overlay),
                        base_opacity: None,
                    };
                    self.records.push(record);
                    self.enabled.insert(id);
                    report.loaded.push(id);
                }
                Err(e) => {
                    warn!(layer = %entry.name, error = %e, "failed to load layer");
                    self.records.push(LayerRecord {
                        id,
                        name: entry.name,
                        source: entry.source,
                        feature_count: entry.features,
                        bounds: None,
                        state: LayerState::Failed,
                        data: None,
                        overlay: None,
                        base_opacity: None,
                    });
                    report.failed.push((id, e.to_string()));
                }
            }
            self.order.push(id);
        }
        if self.active.is_none() {
            if let Some(first) = self.enabled.iter().next().copied() {
                self.switch_to(first);
                self.fit_to(first);
            }
        }
        debug!(loaded = report.loaded.len(), failed = report.failed.len(), "payload loaded");
        report
    }

    // Operations

    /// Adds a layer from a parsed JSON document and makes it active. On
    /// error nothing changes.
    pub fn add_layer(&mut self, data: Value, name: &str, source: &str) -> Result<LayerId> {
        let fc = collection::parse_value(data)?;
        let id = self.next_id;
        let overlay = self.build(id, &fc)?;
        let id = self.alloc_id();
        self.records.push(LayerRecord {
            id,
            name: name.to_string(),
            source: source.to_string(),
            feature_count: fc.features.len(),
            bounds: collection::bounds(&fc),
            state: LayerState::Live,
            data: Some(fc),
            overlay: Some(overlay),
            base_opacity: None,
        });
        self.enabled.insert(id);
        self.order.push(id);
        debug!(id, name, "layer added");
        self.switch_to(id);
        self.fit_to(id);
        Ok(id)
    }

    pub fn add_layer_str(&mut self, text: &str, name: &str, source: &str) -> Result<LayerId> {
        let v: Value = serde_json::from_str(text).map_err(|e| GeocmpError::Parse(e.to_string()))?;
        self.add_layer(v, name, source)
    }

    fn fit_to(&mut self, id: LayerId) {
        if let Some(b) = self.record(id).and_then(|r| r.bounds) {
            self.surface.fit_bounds(b, self.config.fit_padding);
        }
    }

    /// Tombstones a layer. Unknown or already removed ids are ignored.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else { return false };
        let rec = &mut self.records[idx];
        if rec.state == LayerState::Removed {
            return false;
        }
        if let Some(overlay) = rec.overlay.take() {
            self.surface.destroy(overlay);
        }
        rec.state = LayerState::Removed;
        rec.data = None;
        rec.base_opacity = None;
        self.enabled.remove(&id);
        self.order.retain(|&x| x != id);
        debug!(id, "layer removed");
        if self.active == Some(id) {
            self.active = None;
            if let Some(next) = self.enabled.iter().next().copied() {
                self.switch_to(next);
            }
        }
        true
    }

    pub fn set_enabled(&mut self, id: LayerId, enabled: bool) -> bool {
        if !self.record(id).map_or(false, |r| r.is_live()) {
            return false;
        }
        if enabled {
            let inserted = self.enabled.insert(id);
            if self.active.is_none() {
                self.switch_to(id);
            }
            return inserted;
        }
        if !self.enabled.remove(&id) {
            return false;
        }
        if self.active == Some(id) {
            if self.enabled.is_empty() {
                self.deactivate();
            } else {
                self.cycle_next();
            }
        }
        true
    }

    fn deactivate(&mut self) {
        if let Some(idx) = self.active.take().and_then(|prev| self.index_of(prev)) {
            if let Some(ov) = self.records[idx].overlay.as_ref() {
                self.surface.hide(ov);
            }
        }
    }

    /// Shows `id` in place of the current layer. Ignored unless the layer is
    /// live and enabled.
    pub fn switch_to(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else { return false };
        if !self.records[idx].is_live() || !self.enabled.contains(&id) {
            return false;
        }
        if self.active != Some(id) {
            if let Some(prev) = self.active.and_then(|p| self.index_of(p)) {
                if let Some(ov) = self.records[prev].overlay.as_ref() {
                    self.surface.hide(ov);
                }
            }
            if let Some(ov) = self.records[idx].overlay.as_ref() {
                self.surface.show(ov);
            }
            self.active = Some(id);
            debug!(id, "switched layer");
        }
        self.apply_opacity();
        true
    }

    /// Advances to the next enabled layer in id order, wrapping around.
    pub fn cycle_next(&mut self) -> bool {
        let next = match self.active {
            Some(cur) => self.enabled.range(cur + 1..).next().or_else(|| self.enabled.iter().next()),
            None => self.enabled.iter().next(),
        };
        match next.copied() {
            Some(id) => self.switch_to(id),
            None => false,
        }
    }

    /// Scales the active layer's opacity. Each feature keeps its own base
    /// opacity, so the result depends only on the latest multiplier.
    pub fn set_opacity(&mut self, multiplier: f64) -> Result<()> {
        self.opacity = check_unit_range("opacity", multiplier, OPACITY_MIN, OPACITY_MAX)?;
        self.apply_opacity();
        Ok(())
    }

    fn apply_opacity(&mut self) {
        let Some(idx) = self.active.and_then(|id| self.index_of(id)) else { return };
        let rec = &mut self.records[idx];
        let (Some(overlay), Some(data)) = (rec.overlay.as_ref(), rec.data.as_ref()) else { return };
        let base = rec.base_opacity.get_or_insert_with(|| {
            data.features.iter().map(|f| FeatureOpacity::from(&style::feature_style(f))).collect()
        });
        let scaled: Vec<FeatureOpacity> = base.iter().map(|b| b.scaled(self.opacity)).collect();
        self.surface.restyle(overlay, &scaled);
    }

    /// Layer at the list position a digit selects, if any.
    pub fn resolve_hotkey(&self, digit: u8) -> Option<LayerId> {
        keys::digit_position(digit).and_then(|pos| self.order.get(pos).copied())
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        match keys::action_for(key) {
            Some(KeyAction::Select(d)) => self.resolve_hotkey(d).map_or(false, |id| self.switch_to(id)),
            Some(KeyAction::Cycle) => self.cycle_next(),
            Some(KeyAction::ToggleInfo) => {
                self.info_visible = !self.info_visible;
                true
            }
            Some(KeyAction::ToggleHelp) => {
                self.help_visible = !self.help_visible;
                true
            }
            None => false,
        }
    }

    // Base map

    pub fn select_base_layer(&mut self, key: &str) -> Result<()> {
        let base = self.config.base_layer(key).ok_or_else(|| GeocmpError::UnknownBaseLayer(key.to_string()))?;
        self.surface.set_base_layer(base);
        self.surface.set_base_opacity(self.base_map.opacity);
        self.base_map.selected = key.to_string();
        Ok(())
    }

    pub fn set_base_opacity(&mut self, opacity: f64) -> Result<()> {
        self.base_map.opacity = check_unit_range("baseOpacity", opacity, OPACITY_MIN, OPACITY_MAX)?;
        self.surface.set_base_opacity(self.base_map.opacity);
        Ok(())
    }

    pub fn toggle_background(&mut self) -> bool {
        self.base_map.dark_background = !self.base_map.dark_background;
        self.surface.set_background(self.base_map.background_color());
        self.base_map.dark_background
    }

    // Commands

    /// Applies one command. Returns whether the command took effect.
    pub fn dispatch(&mut self, cmd: Command) -> Result<bool> {
        debug!(?cmd, "dispatch");
        match cmd {
            Command::AddLayer { data, name, source } => self.add_layer(data, &name, &source).map(|_| true),
            Command::RemoveLayer(id) => Ok(self.remove_layer(id)),
            Command::SetEnabled { id, enabled } => Ok(self.set_enabled(id, enabled)),
            Command::SwitchTo(id) => Ok(self.switch_to(id)),
            Command::CycleNext => Ok(self.cycle_next()),
            Command::SetOpacity(m) => self.set_opacity(m).map(|_| true),
            Command::SelectBaseLayer(key) => self.select_base_layer(&key).map(|_| true),
            Command::SetBaseOpacity(o) => self.set_base_opacity(o).map(|_| true),
            Command::ToggleBackground => {
                self.toggle_background();
                Ok(true)
            }
            Command::ToggleInfo => {
                self.info_visible = !self.info_visible;
                Ok(true)
            }
            Command::ToggleHelp => {
                self.help_visible = !self.help_visible;
                Ok(true)
            }
        }
    }

    /// Processes one drop batch. Each file succeeds or fails on its own.
    pub fn drop_files(&mut self, files: Vec<DroppedFile>) -> DropReport {
        let mut report = DropReport::default();
        for file in files {
            let outcome = match dropzone::screen(&file) {
                Some(reason) => {
                    warn!(file = %file.name, %reason, "dropped file rejected");
                    DropOutcome::Rejected { reason }
                }
                None => match self.add_layer_str(&file.text, &file.name, dropzone::DROPPED_SOURCE) {
                    Ok(id) => DropOutcome::Added { id },
                    Err(e) => {
                        warn!(file = %file.name, error = %e, "dropped file failed to load");
                        DropOutcome::Failed { error: e.to_string() }
                    }
                },
            };
            report.files.push(DroppedFileResult { name: file.name, outcome });
        }
        report
    }

    // Viewport

    pub fn viewport_from_hash(&self, hash: &str) -> Viewport {
        fragment::parse(hash, self.config.default_viewport, self.config.max_zoom)
    }

    pub fn fragment_for(&self, vp: &Viewport) -> String {
        fragment::format(vp)
    }

    // View

    pub fn view(&self) -> ViewState {
        let entries = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(pos, &id)| {
                let r = self.record(id)?;
                Some(ListEntry {
                    id,
                    name: r.name.clone(),
                    hotkey: keys::hotkey_label(pos),
                    enabled: self.enabled.contains(&id),
                    active: self.active == Some(id),
                    failed: r.state == LayerState::Failed,
                })
            })
            .collect();
        let info = self.active.and_then(|id| self.record(id)).map(|r| InfoPanel {
            name: r.name.clone(),
            source: r.source.clone(),
            features: r.feature_count,
        });
        ViewState {
            entries,
            active: self.active,
            info,
            opacity: self.opacity,
            base_map: self.base_map.clone(),
            info_visible: self.info_visible,
            help_visible: self.help_visible,
        }
    }
}
