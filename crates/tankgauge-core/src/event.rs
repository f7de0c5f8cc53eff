//! Input events delivered by the host.
//!
//! Positions are container-relative: `(0, 0)` is the top-left corner of the
//! element the gauge is attached to.

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved to position
    PointerMove {
        /// New position
        position: Point,
    },
    /// Pointer left the container
    PointerLeave,
    /// Primary button clicked
    Click {
        /// Position of click
        position: Point,
    },
    /// Container resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { position } | Self::Click { position } => Some(*position),
            Self::PointerLeave | Self::Resize { .. } => None,
        }
    }

    /// New container size for resize events.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        match self {
            Self::Resize { width, height } => Some(Size::new(*width, *height)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position() {
        let e = Event::PointerMove {
            position: Point::new(3.0, 4.0),
        };
        assert_eq!(e.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(Event::PointerLeave.position(), None);
    }

    #[test]
    fn test_event_size() {
        let e = Event::Resize {
            width: 120.0,
            height: 300.0,
        };
        assert_eq!(e.size(), Some(Size::new(120.0, 300.0)));
        assert_eq!(e.position(), None);
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let e = Event::Click {
            position: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
