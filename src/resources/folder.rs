//! Resource folder qualifiers and configuration matching.
//!
//! A resource folder is named `<type>[-qualifier]*`, for example `layout-land`
//! or `values-xlarge-v11`. Qualifiers must follow the canonical axis order
//! (see [`Axis`]). For a given device, [`best_match`] picks the folder whose
//! qualifiers fit it most specifically.

use std::fmt;

use crate::config::{
    Density, DeviceConfiguration, Keyboard, KeyboardState, Navigation, NavigationState, ScreenOrientation,
    ScreenRatio, ScreenSize, TouchScreen,
};

/// Qualifier axes in canonical folder-name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Axis {
    ScreenSize,
    ScreenRatio,
    Orientation,
    Density,
    Touch,
    KeyboardState,
    Keyboard,
    NavigationState,
    Navigation,
    Dimension,
    Version,
}

impl Axis {
    pub const ALL: [Axis; 11] = [
        Axis::ScreenSize,
        Axis::ScreenRatio,
        Axis::Orientation,
        Axis::Density,
        Axis::Touch,
        Axis::KeyboardState,
        Axis::Keyboard,
        Axis::NavigationState,
        Axis::Navigation,
        Axis::Dimension,
        Axis::Version,
    ];
}

/// Qualifiers set on one resource folder. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FolderConfiguration {
    pub screen_size: Option<ScreenSize>,
    pub screen_ratio: Option<ScreenRatio>,
    pub orientation: Option<ScreenOrientation>,
    pub density: Option<Density>,
    pub touch: Option<TouchScreen>,
    pub keyboard_state: Option<KeyboardState>,
    pub keyboard: Option<Keyboard>,
    pub navigation_state: Option<NavigationState>,
    pub navigation: Option<Navigation>,
    /// Screen dimension, larger value first.
    pub dimension: Option<(u32, u32)>,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderNameError {
    Empty,
    UnknownQualifier(String),
    OutOfOrder(String),
}

impl fmt::Display for FolderNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderNameError::Empty => write!(f, "empty folder name"),
            FolderNameError::UnknownQualifier(q) => write!(f, "unknown qualifier '{q}'"),
            FolderNameError::OutOfOrder(q) => write!(f, "qualifier '{q}' is out of order"),
        }
    }
}

impl std::error::Error for FolderNameError {}

/// Splits a folder name into its type segment and qualifiers.
pub fn parse_folder_name(name: &str) -> Result<(&str, FolderConfiguration), FolderNameError> {
    let mut segments = name.split('-');
    let folder_type = match segments.next() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(FolderNameError::Empty),
    };

    let mut config = FolderConfiguration::default();
    let mut last: Option<Axis> = None;
    for segment in segments {
        let axis = config
            .apply(segment)
            .ok_or_else(|| FolderNameError::UnknownQualifier(segment.to_string()))?;
        if last.is_some_and(|prev| prev >= axis) {
            return Err(FolderNameError::OutOfOrder(segment.to_string()));
        }
        last = Some(axis);
    }

    Ok((folder_type, config))
}

impl FolderConfiguration {
    /// Parses one qualifier token into the matching axis. Returns the axis set.
    fn apply(&mut self, token: &str) -> Option<Axis> {
        if let Ok(v) = token.parse() {
            self.screen_size = Some(v);
            return Some(Axis::ScreenSize);
        }
        if let Ok(v) = token.parse() {
            self.screen_ratio = Some(v);
            return Some(Axis::ScreenRatio);
        }
        if let Ok(v) = token.parse() {
            self.orientation = Some(v);
            return Some(Axis::Orientation);
        }
        if let Ok(v) = token.parse() {
            self.density = Some(v);
            return Some(Axis::Density);
        }
        if let Ok(v) = token.parse() {
            self.touch = Some(v);
            return Some(Axis::Touch);
        }
        if let Ok(v) = token.parse() {
            self.keyboard_state = Some(v);
            return Some(Axis::KeyboardState);
        }
        if let Ok(v) = token.parse() {
            self.keyboard = Some(v);
            return Some(Axis::Keyboard);
        }
        if let Ok(v) = token.parse() {
            self.navigation_state = Some(v);
            return Some(Axis::NavigationState);
        }
        if let Ok(v) = token.parse() {
            self.navigation = Some(v);
            return Some(Axis::Navigation);
        }
        if let Some((a, b)) = token.split_once('x') {
            if let (Ok(a), Ok(b)) = (a.parse::<u32>(), b.parse::<u32>()) {
                self.dimension = Some(if a >= b { (a, b) } else { (b, a) });
                return Some(Axis::Dimension);
            }
        }
        if let Some(level) = token.strip_prefix('v').and_then(|v| v.parse::<u32>().ok()) {
            self.version = Some(level);
            return Some(Axis::Version);
        }
        None
    }

    fn has(&self, axis: Axis) -> bool {
        match axis {
            Axis::ScreenSize => self.screen_size.is_some(),
            Axis::ScreenRatio => self.screen_ratio.is_some(),
            Axis::Orientation => self.orientation.is_some(),
            Axis::Density => self.density.is_some(),
            Axis::Touch => self.touch.is_some(),
            Axis::KeyboardState => self.keyboard_state.is_some(),
            Axis::Keyboard => self.keyboard.is_some(),
            Axis::NavigationState => self.navigation_state.is_some(),
            Axis::Navigation => self.navigation.is_some(),
            Axis::Dimension => self.dimension.is_some(),
            Axis::Version => self.version.is_some(),
        }
    }

    /// Whether every qualifier set on this folder accepts `device`.
    pub fn is_match_for(&self, device: &DeviceConfiguration) -> bool {
        fn eq_or_any<T: PartialEq>(folder: Option<T>, device: T) -> bool {
            folder.map_or(true, |f| f == device)
        }

        self.screen_size.map_or(true, |s| s <= device.screen_size())
            && eq_or_any(self.screen_ratio, device.screen_ratio())
            && eq_or_any(self.orientation, device.screen_orientation())
            && eq_or_any(self.touch, device.touch_type())
            && self.keyboard_state.map_or(true, |k| k.accepts(device.keyboard_state()))
            && eq_or_any(self.keyboard, device.keyboard_type())
            && eq_or_any(self.navigation_state, device.navigation_state())
            && eq_or_any(self.navigation, device.navigation_type())
            && eq_or_any(self.dimension, device.screen_dimension())
            && self.version.map_or(true, |v| v <= device.api_level())
    }
}

impl fmt::Display for FolderConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.screen_size.map(|v| v.to_string()));
        parts.extend(self.screen_ratio.map(|v| v.to_string()));
        parts.extend(self.orientation.map(|v| v.to_string()));
        parts.extend(self.density.map(|v| v.to_string()));
        parts.extend(self.touch.map(|v| v.to_string()));
        parts.extend(self.keyboard_state.map(|v| v.to_string()));
        parts.extend(self.keyboard.map(|v| v.to_string()));
        parts.extend(self.navigation_state.map(|v| v.to_string()));
        parts.extend(self.navigation.map(|v| v.to_string()));
        parts.extend(self.dimension.map(|(a, b)| format!("{a}x{b}")));
        parts.extend(self.version.map(|v| format!("v{v}")));
        f.write_str(&parts.join("-"))
    }
}

/// Preference of a folder density for a device density; lower is better.
/// Exact first, then the nearest higher density, then the nearest lower one.
fn density_rank(folder: Density, device: Density) -> (u8, u32) {
    if folder == device {
        (0, 0)
    } else if folder == Density::NoDpi {
        (3, 0)
    } else if folder.dpi() > device.dpi() {
        (1, folder.dpi() - device.dpi())
    } else {
        (2, device.dpi() - folder.dpi())
    }
}

/// Picks the value whose folder matches `device` most specifically.
///
/// Candidates are eliminated axis by axis in canonical order: when some
/// remaining candidate sets an axis, those that don't are dropped. Screen size
/// and version keep the largest value, density keeps the best ranked one. Ties
/// resolve to the earliest candidate.
pub fn best_match<'a, T>(
    candidates: impl IntoIterator<Item = (&'a FolderConfiguration, T)>,
    device: &DeviceConfiguration,
) -> Option<T> {
    let mut pool: Vec<(&FolderConfiguration, T)> =
        candidates.into_iter().filter(|(folder, _)| folder.is_match_for(device)).collect();

    for axis in Axis::ALL {
        if pool.len() <= 1 {
            break;
        }
        if !pool.iter().any(|(folder, _)| folder.has(axis)) {
            continue;
        }
        pool.retain(|(folder, _)| folder.has(axis));

        match axis {
            Axis::ScreenSize => {
                let best = pool.iter().filter_map(|(f, _)| f.screen_size).max();
                pool.retain(|(f, _)| f.screen_size == best);
            }
            Axis::Version => {
                let best = pool.iter().filter_map(|(f, _)| f.version).max();
                pool.retain(|(f, _)| f.version == best);
            }
            Axis::Density => {
                let rank = |f: &FolderConfiguration| f.density.map(|d| density_rank(d, device.density()));
                let best = pool.iter().filter_map(|(f, _)| rank(*f)).min();
                pool.retain(|(f, _)| rank(*f) == best);
            }
            _ => {}
        }
    }

    pool.into_iter().next().map(|(_, value)| value)
}
