mod device;
mod job;
mod qualifiers;

pub use device::{build_configuration, DeviceConfiguration, DeviceConfigurationBuilder};
pub use job::{default_device, RenderJob, RenderJobBuilder};
pub use qualifiers::{
    Density, Keyboard, KeyboardState, Navigation, NavigationState, ScreenOrientation, ScreenRatio, ScreenSize,
    TouchScreen, UnknownQualifier,
};
