pub mod canvas;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod layout;
pub mod message;
pub mod raster;
pub mod render;
pub mod segment;
pub mod store;
pub mod sweep;

#[cfg(feature = "opencv")]
pub mod mat_canvas;

mod circular_queue;
mod track;

pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use circular_queue::CircularQueue;
pub use color::{Color, ColorScheme};
pub use config::EngineConfig;
pub use engine::{Engine, Handled};
pub use error::Error;
pub use key::TrackKey;
pub use layout::CameraDescriptor;
pub use message::Message;
pub use raster::RasterCanvas;
pub use render::{Layers, Marker};
pub use segment::Segmenter;
pub use store::TrackStore;
pub use track::{Track, TrailPoint};
