//! Device/screen configuration.
//!
//! A [`DeviceConfiguration`] bundles every axis the engine and the resource
//! matcher care about. Screen dimensions are given unordered and assigned to
//! width/height from the orientation, so `1280, 800` and `800, 1280` describe
//! the same landscape screen.
//!
//! # Examples
//!
//! ```rust
//! use layout_render::config::{DeviceConfiguration, ScreenOrientation, ScreenSize};
//! # fn main() -> Result<(), layout_render::RenderError> {
//! let config = DeviceConfiguration::builder()
//!     .dimensions(800, 1280)
//!     .screen_size(ScreenSize::XLarge)
//!     .orientation(ScreenOrientation::Landscape)
//!     .api_level(12)
//!     .build()?;
//! assert_eq!((config.screen_width_px(), config.screen_height_px()), (1280, 800));
//! # Ok(()) }
//! ```

use std::fmt;

use crate::config::qualifiers::{
    Density, Keyboard, KeyboardState, Navigation, NavigationState, ScreenOrientation, ScreenRatio, ScreenSize,
    TouchScreen,
};
use crate::errors::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceConfiguration {
    screen_width_px: u32,
    screen_height_px: u32,
    screen_size: ScreenSize,
    screen_ratio: ScreenRatio,
    screen_orientation: ScreenOrientation,
    density: Density,
    touch_type: TouchScreen,
    keyboard_state: KeyboardState,
    keyboard_type: Keyboard,
    navigation_state: NavigationState,
    navigation_type: Navigation,
    api_level: u32,
}

/// Builds a configuration from unordered screen dimensions.
///
/// `Landscape` puts the larger dimension in the width, `Portrait` in the
/// height. `Square` requires both dimensions to be equal.
///
/// # Errors
///
/// [`RenderError::InvalidConfiguration`] when a dimension or the api level is
/// not positive, or when a square screen has unequal dimensions.
#[allow(clippy::too_many_arguments)]
pub fn build_configuration(
    dim1: i32,
    dim2: i32,
    size: ScreenSize,
    ratio: ScreenRatio,
    orientation: ScreenOrientation,
    density: Density,
    touch: TouchScreen,
    kb_state: KeyboardState,
    kb_type: Keyboard,
    nav_state: NavigationState,
    nav_type: Navigation,
    api_level: i32,
) -> Result<DeviceConfiguration, RenderError> {
    if dim1 <= 0 || dim2 <= 0 {
        return Err(RenderError::InvalidConfiguration(format!(
            "screen dimensions must be positive, got {dim1}x{dim2}"
        )));
    }
    if api_level <= 0 {
        return Err(RenderError::InvalidConfiguration(format!(
            "api level must be positive, got {api_level}"
        )));
    }

    let (large, small) = if dim1 >= dim2 { (dim1, dim2) } else { (dim2, dim1) };
    let (width, height) = match orientation {
        ScreenOrientation::Landscape => (large, small),
        ScreenOrientation::Portrait => (small, large),
        ScreenOrientation::Square => {
            if dim1 != dim2 {
                return Err(RenderError::InvalidConfiguration(format!(
                    "square orientation needs equal dimensions, got {dim1}x{dim2}"
                )));
            }
            (dim1, dim2)
        }
    };

    Ok(DeviceConfiguration {
        screen_width_px: width as u32,
        screen_height_px: height as u32,
        screen_size: size,
        screen_ratio: ratio,
        screen_orientation: orientation,
        density,
        touch_type: touch,
        keyboard_state: kb_state,
        keyboard_type: kb_type,
        navigation_state: nav_state,
        navigation_type: nav_type,
        api_level: api_level as u32,
    })
}

impl DeviceConfiguration {
    pub fn builder() -> DeviceConfigurationBuilder {
        DeviceConfigurationBuilder::default()
    }

    pub fn screen_width_px(&self) -> u32 { self.screen_width_px }
    pub fn screen_height_px(&self) -> u32 { self.screen_height_px }
    pub fn screen_size(&self) -> ScreenSize { self.screen_size }
    pub fn screen_ratio(&self) -> ScreenRatio { self.screen_ratio }
    pub fn screen_orientation(&self) -> ScreenOrientation { self.screen_orientation }
    pub fn density(&self) -> Density { self.density }
    pub fn touch_type(&self) -> TouchScreen { self.touch_type }
    pub fn keyboard_state(&self) -> KeyboardState { self.keyboard_state }
    pub fn keyboard_type(&self) -> Keyboard { self.keyboard_type }
    pub fn navigation_state(&self) -> NavigationState { self.navigation_state }
    pub fn navigation_type(&self) -> Navigation { self.navigation_type }
    pub fn api_level(&self) -> u32 { self.api_level }

    /// Screen dimensions as they appear in a folder qualifier: larger first.
    pub fn screen_dimension(&self) -> (u32, u32) {
        let (w, h) = (self.screen_width_px, self.screen_height_px);
        if w >= h { (w, h) } else { (h, w) }
    }

    /// Full qualifier string, e.g. `xlarge-long-land-mdpi-finger-keyssoft-qwerty-navexposed-nonav-1280x800-v12`.
    pub fn qualifier_string(&self) -> String {
        let (d1, d2) = self.screen_dimension();
        format!(
            "{}-{}-{}-{}-{}-{}-{}-{}-{}-{}x{}-v{}",
            self.screen_size,
            self.screen_ratio,
            self.screen_orientation,
            self.density,
            self.touch_type,
            self.keyboard_state,
            self.keyboard_type,
            self.navigation_state,
            self.navigation_type,
            d1,
            d2,
            self.api_level,
        )
    }
}

impl fmt::Display for DeviceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualifier_string())
    }
}

/// Builder for [`DeviceConfiguration`]. Values are collected unvalidated and
/// checked by [`build_configuration`] in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct DeviceConfigurationBuilder {
    dim1: i32,
    dim2: i32,
    size: ScreenSize,
    ratio: ScreenRatio,
    orientation: ScreenOrientation,
    density: Density,
    touch: TouchScreen,
    kb_state: KeyboardState,
    kb_type: Keyboard,
    nav_state: NavigationState,
    nav_type: Navigation,
    api_level: i32,
}

impl Default for DeviceConfigurationBuilder {
    fn default() -> Self {
        Self {
            dim1: 320,
            dim2: 480,
            size: ScreenSize::Normal,
            ratio: ScreenRatio::NotLong,
            orientation: ScreenOrientation::Portrait,
            density: Density::Medium,
            touch: TouchScreen::Finger,
            kb_state: KeyboardState::Soft,
            kb_type: Keyboard::Qwerty,
            nav_state: NavigationState::Exposed,
            nav_type: Navigation::NoNav,
            api_level: 1,
        }
    }
}

impl DeviceConfigurationBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Screen dimensions in any order.
    pub fn dimensions(self, dim1: i32, dim2: i32) -> Self { self.map(|b| { b.dim1 = dim1; b.dim2 = dim2; }) }
    pub fn screen_size(self, size: ScreenSize) -> Self { self.map(|b| b.size = size) }
    pub fn screen_ratio(self, ratio: ScreenRatio) -> Self { self.map(|b| b.ratio = ratio) }
    pub fn orientation(self, orientation: ScreenOrientation) -> Self { self.map(|b| b.orientation = orientation) }
    pub fn density(self, density: Density) -> Self { self.map(|b| b.density = density) }
    pub fn touch(self, touch: TouchScreen) -> Self { self.map(|b| b.touch = touch) }
    pub fn keyboard_state(self, state: KeyboardState) -> Self { self.map(|b| b.kb_state = state) }
    pub fn keyboard(self, keyboard: Keyboard) -> Self { self.map(|b| b.kb_type = keyboard) }
    pub fn navigation_state(self, state: NavigationState) -> Self { self.map(|b| b.nav_state = state) }
    pub fn navigation(self, navigation: Navigation) -> Self { self.map(|b| b.nav_type = navigation) }
    pub fn api_level(self, level: i32) -> Self { self.map(|b| b.api_level = level) }

    pub fn build(self) -> Result<DeviceConfiguration, RenderError> {
        build_configuration(
            self.dim1,
            self.dim2,
            self.size,
            self.ratio,
            self.orientation,
            self.density,
            self.touch,
            self.kb_state,
            self.kb_type,
            self.nav_state,
            self.nav_type,
            self.api_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn build(d1: i32, d2: i32, orientation: ScreenOrientation, api: i32) -> Result<DeviceConfiguration, RenderError> {
        build_configuration(
            d1,
            d2,
            ScreenSize::XLarge,
            ScreenRatio::Long,
            orientation,
            Density::Medium,
            TouchScreen::Finger,
            KeyboardState::Soft,
            Keyboard::Qwerty,
            NavigationState::Exposed,
            Navigation::NoNav,
            api,
        )
    }

    #[test]
    fn landscape_puts_larger_dimension_in_width() {
        for (d1, d2) in [(1280, 800), (800, 1280), (2, 1), (1, 2)] {
            let c = build(d1, d2, ScreenOrientation::Landscape, 12).unwrap();
            assert!(c.screen_width_px() > c.screen_height_px(), "{d1}x{d2}");
        }
    }

    #[test]
    fn portrait_puts_larger_dimension_in_height() {
        for (d1, d2) in [(1280, 800), (800, 1280), (480, 320)] {
            let c = build(d1, d2, ScreenOrientation::Portrait, 12).unwrap();
            assert!(c.screen_height_px() > c.screen_width_px(), "{d1}x{d2}");
        }
    }

    #[test]
    fn square_requires_equal_dimensions() {
        let c = build(600, 600, ScreenOrientation::Square, 12).unwrap();
        assert_eq!((c.screen_width_px(), c.screen_height_px()), (600, 600));

        let err = build(600, 601, ScreenOrientation::Square, 12).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn non_positive_values_are_rejected() {
        for (d1, d2, api) in [(0, 800, 12), (1280, 0, 12), (-1, 800, 12), (1280, -5, 12), (1280, 800, 0), (1280, 800, -3)] {
            let err = build(d1, d2, ScreenOrientation::Landscape, api).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{d1}x{d2} api {api}");
        }
    }

    #[test]
    fn builder_applies_defaults_and_validates() {
        let c = DeviceConfiguration::builder().build().unwrap();
        assert_eq!(c.screen_orientation(), ScreenOrientation::Portrait);
        assert_eq!((c.screen_width_px(), c.screen_height_px()), (320, 480));

        assert!(DeviceConfiguration::builder().api_level(0).build().is_err());
    }

    #[test]
    fn qualifier_string_lists_every_axis() {
        let c = build(800, 1280, ScreenOrientation::Landscape, 12).unwrap();
        assert_eq!(
            c.qualifier_string(),
            "xlarge-long-land-mdpi-finger-keyssoft-qwerty-navexposed-nonav-1280x800-v12"
        );
        let p = build(800, 1280, ScreenOrientation::Portrait, 12).unwrap();
        assert_eq!(p.screen_dimension(), (1280, 800));
    }
}
