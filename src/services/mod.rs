//! Services module - platform helpers the run loop consumes.
//!
//! These services have no dependency on the run-loop state and can be tested in
//! isolation.
//!
//! # Components
//!
//! - [`resources`]: Locating the UI resource directory next to the executable and
//!   finding font files in the platform font directories.
//!   - [`find_resource_path`]: `<exe dir>/resources`, macOS bundle `Resources`, or `../resources`
//!   - [`find_font_path`] / [`find_font_in_dirs`]: exact stem match first, then
//!     `-Regular`/`-Normal`/`-Medium`/`-Narrow` variants
//!
//! - [`alert`]: The blocking native alert used for fatal startup failures, before
//!   any window exists.
//!   - [`NativeAlert`]: the contract, replaceable for embedding and tests
//!   - [`RfdAlert`]: default implementation on top of `rfd::MessageDialog`

pub mod alert;
pub mod resources;

pub use alert::{NativeAlert, RfdAlert};
pub use resources::{find_font_in_dirs, find_font_path, find_resource_path, system_font_dirs};
