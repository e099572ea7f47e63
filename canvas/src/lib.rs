//! Interactive polygon-mask editing engine.
//!
//! Users outline up to six regions over an image by clicking vertices,
//! dragging them, inserting on edges and deleting with the secondary button.
//! Each region is tagged add or subtract. The crate owns the full editing
//! lifecycle: pointer events become region mutations, mutations become a
//! persisted JSON string, and every change yields a render snapshot that the
//! host draws however it likes. The host is reached only through
//! [`host::Host`], so the whole engine runs headless under test.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host-facing [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`doc`] | Regions, add/subtract modes and the fixed-size region set |
//! | [`geom`] | Points, sizes and the image/display coordinate mapping |
//! | [`viewport`] | Display fitting and the active frame/display pair |
//! | [`input`] | Pointer buttons, hover targets and the drag state machine |
//! | [`hit`] | Vertex and edge hit-testing |
//! | [`codec`] | Persisted polygon JSON encode/decode |
//! | [`render`] | Palette, per-region styles and render snapshots |
//! | [`host`] | The [`host::Host`] trait and a recording implementation |
//! | [`config`] | Editor tuning knobs and presets |
//! | [`consts`] | Shared numeric constants (hit radii, layout padding, etc.) |

pub mod codec;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod host;
pub mod input;
pub mod render;
pub mod viewport;
