use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::error::Error;
use crate::key::TrackKey;
use crate::layout::{CameraDescriptor, CameraLayout};
use crate::message::{CameraEntry, FrameSnapshot, Message, RawDetection};
use crate::render::{self, Layers, Marker};
use crate::segment::Segmenter;
use crate::store::TrackStore;
use crate::sweep::sweep;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// Static layout replaced and repainted.
    Layout { cameras: usize },
    /// Snapshot processed at `tick`.
    Frame {
        tick: u64,
        visible: usize,
        evicted: Vec<TrackKey>,
    },
    /// Unknown message type.
    Ignored,
    /// Unparseable payload. Nothing changed.
    Dropped,
}

/// Message-driven trajectory engine. Each message runs to completion
/// (resolve, upsert, sweep, segment, paint) before the next one is accepted.
pub struct Engine<C> {
    config: EngineConfig,
    segmenter: Segmenter,
    store: TrackStore,
    layout: CameraLayout,
    visible: Vec<Marker>,
    layers: Layers<C>,
}

impl<C: Canvas> Engine<C> {
    pub fn new(config: EngineConfig, layers: Layers<C>) -> Result<Self, Error> {
        config.validate()?;

        let (width, height) = layers.dims();
        let store = TrackStore::new(width, height, config.history_len, config.color_scheme);

        Ok(Self {
            segmenter: Segmenter::from(&config),
            config,
            store,
            layout: CameraLayout::default(),
            visible: Vec::new(),
            layers,
        })
    }

    /// Parses and handles one payload. Bad input is never an error here; only a failing
    /// drawing surface is.
    pub fn ingest(&mut self, payload: &str) -> Result<Handled, Error> {
        match Message::from_json(payload) {
            Ok(msg) => self.handle(msg),
            Err(err) => {
                tracing::warn!(tick = self.store.tick(), "dropping message: {}", err);
                Ok(Handled::Dropped)
            }
        }
    }

    pub fn handle(&mut self, msg: Message) -> Result<Handled, Error> {
        match msg {
            Message::CameraInit { cameras } => self.camera_init(&cameras),
            Message::DetectedData { data } => self.detected_data(&data),
            Message::Other => Ok(Handled::Ignored),
        }
    }

    fn camera_init(&mut self, cameras: &BTreeMap<String, CameraEntry>) -> Result<Handled, Error> {
        self.layout = CameraLayout::from_entries(cameras);
        render::paint_layout(&mut self.layers.layout, &self.layout)?;

        tracing::debug!(cameras = self.layout.len(), "camera layout updated");

        Ok(Handled::Layout {
            cameras: self.layout.len(),
        })
    }

    fn detected_data(&mut self, data: &FrameSnapshot) -> Result<Handled, Error> {
        let tick = self.store.advance();
        self.visible.clear();

        for (camera_id, detections) in data {
            let camera: Rc<str> = Rc::from(camera_id.as_str());

            for (local_id, record) in detections {
                let det = match RawDetection::from_value(record) {
                    Some(det) => det,
                    None => {
                        tracing::trace!(tick, camera = %camera_id, local = %local_id, "skipping non-object detection record");
                        continue;
                    }
                };

                let key = TrackKey::resolve(camera_id, local_id, &det);

                let res = match det.coords() {
                    Some((x, y)) => self.store.upsert(&key, &camera, x, y),
                    None => Err(Error::InvalidPoint {
                        key: key.to_string(),
                    }),
                };

                match res {
                    Ok(pos) => {
                        let color = self.store.color_of(&key);
                        self.visible.push(Marker { key, pos, color });
                    }
                    Err(err) => {
                        tracing::trace!(tick, camera = %camera_id, local = %local_id, "skipping detection: {}", err)
                    }
                }
            }
        }

        let evicted = sweep(&mut self.store, self.config.ttl_frames);

        render::paint_trails(
            &mut self.layers.trails,
            &self.store,
            &self.segmenter,
            self.config.trail_thickness,
        )?;
        render::paint_markers(
            &mut self.layers.markers,
            &self.visible,
            self.config.marker_radius,
        )?;

        tracing::debug!(
            tick,
            tracks = self.store.len(),
            visible = self.visible.len(),
            evicted = evicted.len(),
            "frame processed"
        );

        Ok(Handled::Frame {
            tick,
            visible: self.visible.len(),
            evicted,
        })
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.store.tick()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    #[inline]
    pub fn cameras(&self) -> impl Iterator<Item = &CameraDescriptor> {
        self.layout.iter()
    }

    /// Entities of the latest snapshot.
    #[inline]
    pub fn visible(&self) -> &[Marker] {
        &self.visible
    }

    #[inline]
    pub fn layers(&self) -> &Layers<C> {
        &self.layers
    }

    #[inline]
    pub fn into_layers(self) -> Layers<C> {
        self.layers
    }
}
