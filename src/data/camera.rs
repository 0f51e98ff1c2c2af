//! Camera sources feeding the main preview and the thumbnail strip.
//!
//! Capture backends plug in through [`DeviceProvider`]; the crate ships a
//! synthetic [`TestPatternProvider`] so the viewer runs without hardware.

use std::path::Path;

use egui::{Color32, ColorImage};
use image::{Rgba, RgbaImage};

use crate::error::{MeterError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
}

/// A running stream from one device.
pub trait FrameSource {
    fn device(&self) -> &CameraDevice;
    /// The next frame, or `None` if nothing new is available yet.
    fn next_frame(&mut self) -> Option<ColorImage>;
}

pub trait DeviceProvider {
    fn enumerate(&self) -> Result<Vec<CameraDevice>>;
    fn open(&self, device: &CameraDevice) -> Result<Box<dyn FrameSource>> {
        let index = self
            .enumerate()?
            .iter()
            .position(|d| d.id == device.id)
            .ok_or_else(|| MeterError::UnknownDevice(device.id.clone()))?;
        let tint = PATTERN_TINTS[index % PATTERN_TINTS.len()];
        Ok(Box::new(TestPatternSource::new(
            device.clone(),
            self.width.max(1),
            self.height.max(1),
            tint,
        )))
    }
}

const PATTERN_TINTS: [[u8; 3]; 4] = [[255, 255, 255], [120, 200, 255], [255, 170, 90], [140, 255, 140]];

fn tinted(v: u8, tint: [u8; 3]) -> Color32 {
    let [r, g, b] = tint.map(|c| ((v as u16 * c as u16) / 255) as u8);
    Color32::from_rgb(r, g, b)
}

/// Static diagonal gradient with a bright vertical bar moving across it.
struct TestPatternSource {
    device: CameraDevice,
    width: usize,
    height: usize,
    gradient: Vec<Color32>,
    bar_color: Color32,
    frame: usize,
}

impl TestPatternSource {
    const BAR_HALF_WIDTH: usize = 2;

    fn new(device: CameraDevice, width: usize, height: usize, tint: [u8; 3]) -> Self {
        let mut gradient = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                gradient.push(tinted((((x + y) * 255) / (width + height)) as u8, tint));
            }
        }
        Self {
            device,
            width,
            height,
            gradient,
            bar_color: tinted(255, tint),
            frame: 0,
        }
    }
}

impl FrameSource for TestPatternSource {
    fn device(&self) -> &CameraDevice {
        &self.device
    }

    fn next_frame(&mut self) -> Option<ColorImage> {
        let (w, h) = (self.width, self.height);
        let bar = (self.frame * 4) % w;
        let mut pixels = self.gradient.clone();
        let cols = bar.saturating_sub(Self::BAR_HALF_WIDTH)..(bar + Self::BAR_HALF_WIDTH + 1).min(w);
        for y in 0..h {
            pixels[y * w + cols.start..y * w + cols.end].fill(self.bar_color);
        }
        self.frame = self.frame.wrapping_add(1);
        Some(ColorImage::new([w, h], pixels))
    }
}

/// Nearest-neighbour copy of `frame` no wider than `max_width` pixels.
pub fn downscale(frame: &ColorImage, max_width: usize) -> ColorImage {
    let [w, h] = frame.size;
    let max_width = max_width.max(1);
    if w <= max_width {
        return frame.clone();
    }
    let tw = max_width;
    let th = (h * tw / w).max(1);
    let mut pixels = Vec::with_capacity(tw * th);
    for ty in 0..th {
        let sy = ty * h / th;
        for tx in 0..tw {
            pixels.push(frame.pixels[sy * w + tx * w / tw]);
        }
    }
    ColorImage::new([tw, th], pixels)
}

// ─────────────────────────────────────────────────────────────────────────────
// CameraRig – every device as a thumbnail, one of them as main
// ─────────────────────────────────────────────────────────────────────────────

struct CameraStream {
    source: Box<dyn FrameSource>,
    latest: Option<ColorImage>,
}

pub struct CameraRig {
    streams: Vec<CameraStream>,
    main: usize,
    paused: bool,
    main_frame: Option<ColorImage>,
}

impl CameraRig {
    /// Open every enumerated device; the first one becomes the main camera.
    pub fn open_all(provider: &dyn DeviceProvider) -> Result<Self> {
        let devices = provider.enumerate()?;
        if devices.is_empty() {
            return Err(MeterError::NoCameras);
        }
        let streams = devices
            .iter()
            .map(|d| {
                provider.open(d).map(|source| CameraStream {
                    source,
                    latest: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(count = streams.len(), "opened camera streams");
        Ok(Self {
            streams,
            main: 0,
            paused: false,
            main_frame: None,
        })
    }

    pub fn devices(&self) -> impl Iterator<Item = &CameraDevice> {
        self.streams.iter().map(|s| s.source.device())
    }

    pub fn main_device(&self) -> &CameraDevice {
        self.streams[self.main].source.device()
    }

    /// Make the device with `id` the main camera. A freshly selected camera
    /// starts playing.
    pub fn select_main(&mut self, id: &str) -> Result<()> {
        let idx = self
            .streams
            .iter()
            .position(|s| s.source.device().id == id)
            .ok_or_else(|| MeterError::UnknownDevice(id.to_string()))?;
        self.main = idx;
        self.paused = false;
        self.main_frame = self.streams[idx].latest.clone();
        tracing::info!(device = id, "main camera selected");
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::info!(paused, "main camera pause toggled");
        }
        self.paused = paused;
    }

    /// Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Pull the next frame from every stream. The main frame stays frozen while paused.
    pub fn poll(&mut self) {
        for stream in &mut self.streams {
            if let Some(frame) = stream.source.next_frame() {
                stream.latest = Some(frame);
            }
        }
        if !self.paused {
            self.main_frame = self.streams[self.main].latest.clone();
        }
    }

    pub fn main_frame(&self) -> Option<&ColorImage> {
        self.main_frame.as_ref()
    }

    /// Latest frame of every stream, in enumeration order.
    pub fn thumbnails(&self) -> impl Iterator<Item = (&CameraDevice, Option<&ColorImage>)> {
        self.streams
            .iter()
            .map(|s| (s.source.device(), s.latest.as_ref()))
    }

    /// Copy of the frame currently shown in the main preview.
    pub fn snapshot(&self) -> Option<ColorImage> {
        self.main_frame.clone()
    }
}

/// Encode `frame` as PNG at `path`.
pub fn save_png(frame: &ColorImage, path: &Path) -> Result<()> {
    let [w, h] = frame.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p: Color32 = frame.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out.save(path)?;
    tracing::info!(?path, "saved snapshot");
    Ok(())
}
