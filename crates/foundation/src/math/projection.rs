//! Geographic to screen projection.
//!
//! The label pipeline only needs three read-only queries from a view:
//! zoom, `project` and `bounds`. [`Viewport`] captures exactly those so
//! callers can plug in their own camera; [`WebMercatorViewport`] is the
//! standard north-up slippy-map camera.

use std::f64::consts::{FRAC_PI_4, PI, TAU};

use serde::{Deserialize, Serialize};

use super::Vec2;
use crate::bounds::Aabb2;

/// Side of the square Web-Mercator world at zoom 0, in pixels.
pub const TILE_SIZE: f64 = 512.0;
/// Latitude limit of the Web-Mercator square (degrees).
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Read-only view snapshot consumed by label placement.
pub trait Viewport {
    fn zoom(&self) -> f64;

    /// Geographic `[lon, lat]` to screen pixels, origin top-left, y down.
    fn project(&self, geo: Vec2) -> Vec2;

    /// Visible extent in geographic coordinates.
    fn bounds(&self) -> Aabb2;
}

/// Camera parameters for a north-up, unpitched map view.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            zoom: 0.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewState {
    pub fn new(longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self {
            longitude,
            latitude,
            zoom,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Converts `[lon, lat]` in degrees to zoom-0 world pixels (y grows north).
pub fn lng_lat_to_world(geo: Vec2) -> Vec2 {
    let lambda = geo.x.to_radians();
    let phi = geo.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = TILE_SIZE * (lambda + PI) / TAU;
    let y = TILE_SIZE * (PI + (FRAC_PI_4 + phi * 0.5).tan().ln()) / TAU;
    Vec2::new(x, y)
}

/// Inverse of [`lng_lat_to_world`].
pub fn world_to_lng_lat(world: Vec2) -> Vec2 {
    let lambda = world.x / TILE_SIZE * TAU - PI;
    let phi = 2.0 * ((world.y / TILE_SIZE * TAU - PI).exp().atan() - FRAC_PI_4);
    Vec2::new(lambda.to_degrees(), phi.to_degrees())
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercatorViewport {
    view: ViewState,
    scale: f64,
    center_world: Vec2,
}

impl WebMercatorViewport {
    pub fn new(view: ViewState) -> Self {
        let view = ViewState {
            latitude: view.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            ..view
        };
        Self {
            view,
            scale: 2f64.powf(view.zoom),
            center_world: lng_lat_to_world(Vec2::new(view.longitude, view.latitude)),
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Screen pixels back to `[lon, lat]`.
    pub fn unproject(&self, px: Vec2) -> Vec2 {
        let world = Vec2::new(
            self.center_world.x + (px.x - self.view.width * 0.5) / self.scale,
            self.center_world.y - (px.y - self.view.height * 0.5) / self.scale,
        );
        world_to_lng_lat(world)
    }
}

impl Viewport for WebMercatorViewport {
    fn zoom(&self) -> f64 {
        self.view.zoom
    }

    fn project(&self, geo: Vec2) -> Vec2 {
        let world = lng_lat_to_world(geo);
        Vec2::new(
            (world.x - self.center_world.x) * self.scale + self.view.width * 0.5,
            self.view.height * 0.5 - (world.y - self.center_world.y) * self.scale,
        )
    }

    fn bounds(&self) -> Aabb2 {
        let top_left = self.unproject(Vec2::new(0.0, 0.0));
        let bottom_right = self.unproject(Vec2::new(self.view.width, self.view.height));
        Aabb2::from_corners(top_left, bottom_right)
    }
}
