//! Enumerated device axes.
//!
//! Each axis renders as the token used in resource folder names
//! (`layout-land`, `values-xlarge-v11`, ...) and parses back from it.

use std::fmt;
use std::str::FromStr;

/// Error returned when a token does not name a value of the requested axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQualifier(pub String);

impl fmt::Display for UnknownQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown qualifier '{}'", self.0)
    }
}

impl std::error::Error for UnknownQualifier {}

/// Declares a qualifier enum together with its token table.
macro_rules! qualifier_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Token used in resource folder names.
            pub fn token(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = UnknownQualifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(UnknownQualifier(s.to_string())),
                }
            }
        }
    };
}

qualifier_enum! {
    /// Screen size bucket. Ordered from smallest to largest.
    ScreenSize {
        Small => "small",
        Normal => "normal",
        Large => "large",
        XLarge => "xlarge",
    }
}

qualifier_enum! {
    ScreenRatio {
        NotLong => "notlong",
        Long => "long",
    }
}

qualifier_enum! {
    ScreenOrientation {
        Portrait => "port",
        Landscape => "land",
        Square => "square",
    }
}

qualifier_enum! {
    /// Dots-per-inch class. Ordered by increasing dpi.
    Density {
        NoDpi => "nodpi",
        Low => "ldpi",
        Medium => "mdpi",
        Tv => "tvdpi",
        High => "hdpi",
        XHigh => "xhdpi",
        XxHigh => "xxhdpi",
        XxxHigh => "xxxhdpi",
    }
}

impl Density {
    /// Nominal dpi of the class. `NoDpi` resources are never scaled and report 0.
    pub fn dpi(&self) -> u32 {
        match self {
            Density::NoDpi => 0,
            Density::Low => 120,
            Density::Medium => 160,
            Density::Tv => 213,
            Density::High => 240,
            Density::XHigh => 320,
            Density::XxHigh => 480,
            Density::XxxHigh => 640,
        }
    }
}

qualifier_enum! {
    TouchScreen {
        NoTouch => "notouch",
        Stylus => "stylus",
        Finger => "finger",
    }
}

qualifier_enum! {
    KeyboardState {
        Exposed => "keysexposed",
        Hidden => "keyshidden",
        Soft => "keyssoft",
    }
}

impl KeyboardState {
    /// Whether resources qualified with `self` apply to a device in `device` state.
    /// A soft keyboard counts as exposed.
    pub fn accepts(&self, device: KeyboardState) -> bool {
        *self == device || (*self == KeyboardState::Exposed && device == KeyboardState::Soft)
    }
}

qualifier_enum! {
    Keyboard {
        NoKeys => "nokeys",
        Qwerty => "qwerty",
        TwelveKey => "12key",
    }
}

qualifier_enum! {
    NavigationState {
        Exposed => "navexposed",
        Hidden => "navhidden",
    }
}

qualifier_enum! {
    Navigation {
        NoNav => "nonav",
        Dpad => "dpad",
        Trackball => "trackball",
        Wheel => "wheel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_from_str() {
        for size in ScreenSize::ALL {
            assert_eq!(size.token().parse::<ScreenSize>().unwrap(), *size);
        }
        for density in Density::ALL {
            assert_eq!(density.to_string().parse::<Density>().unwrap(), *density);
        }
        assert_eq!("12key".parse::<Keyboard>().unwrap(), Keyboard::TwelveKey);
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "huge".parse::<ScreenSize>().unwrap_err();
        assert_eq!(err.to_string(), "unknown qualifier 'huge'");
        assert!("Land".parse::<ScreenOrientation>().is_err());
    }

    #[test]
    fn ordering_follows_physical_size() {
        assert!(ScreenSize::Small < ScreenSize::XLarge);
        assert!(Density::Medium < Density::High);
        let dpis: Vec<u32> = Density::ALL.iter().map(Density::dpi).collect();
        let mut sorted = dpis.clone();
        sorted.sort();
        assert_eq!(dpis, sorted);
    }

    #[test]
    fn exposed_keyboard_resources_apply_to_soft_keyboard() {
        assert!(KeyboardState::Exposed.accepts(KeyboardState::Soft));
        assert!(KeyboardState::Soft.accepts(KeyboardState::Soft));
        assert!(!KeyboardState::Hidden.accepts(KeyboardState::Soft));
        assert!(!KeyboardState::Soft.accepts(KeyboardState::Exposed));
    }
}
